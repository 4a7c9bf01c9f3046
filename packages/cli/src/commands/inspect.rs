use super::open_session;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use studio_compiler_html::{compile_to_html, render_canvas, render_document, render_preview, to_html};
use studio_editor::Document;
use studio_model::{palette as palette_items, Node};

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Print the document snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RenderMode {
    /// Canvas while editing, preview in preview mode
    Auto,
    Preview,
    Canvas,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(short, long, value_enum, default_value = "auto")]
    pub mode: RenderMode,

    /// Emit a complete HTML page of the published view
    #[arg(long)]
    pub page: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn palette() -> Result<()> {
    println!("{}", "🧱 Palette".bright_blue().bold());
    for item in palette_items() {
        let payload = serde_json::to_string(&item.payload())?;
        println!(
            "  {:<10} {:<10} {}",
            item.label.bright_white(),
            item.block_type().as_str().cyan(),
            payload.dimmed()
        );
    }
    Ok(())
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let (_, session) = open_session(cwd)?;
    let document = session.document();

    if args.json {
        println!("{}", document.to_json()?);
        return Ok(());
    }

    let mode = if document.is_preview() { "preview" } else { "editing" };
    println!("{} {}", document.name().bright_white().bold(), format!("({})", mode).dimmed());
    print_node(document, document.root(), "", true, true);

    if let Some(panel) = document.properties_panel() {
        println!();
        println!("{} {}", "Properties".bright_blue().bold(), panel.node_id.as_str().dimmed());
        for field in panel.fields {
            println!("  {:<10} {}", field.key, field.value);
        }
    }

    Ok(())
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let (config, session) = open_session(cwd)?;
    let document = session.document();
    let options = config.html_options();

    let html = if args.page {
        compile_to_html(document, &options)
    } else {
        let vnode = match args.mode {
            RenderMode::Auto => render_document(document),
            RenderMode::Preview => render_preview(document.root()),
            RenderMode::Canvas => render_canvas(document),
        };
        to_html(&vnode, &options)
    };

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            println!("  {} Rendered → {}", "✓".green(), path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}

fn print_node(document: &Document, node: &Node, prefix: &str, is_last: bool, is_root: bool) {
    let branch = match (is_root, is_last) {
        (true, _) => "",
        (false, true) => "└─ ",
        (false, false) => "├─ ",
    };

    let mut line = format!(
        "{}{}{} {}",
        prefix,
        branch,
        node.block_type().as_str().cyan(),
        node.id().as_str().dimmed()
    );
    if let Some(text) = node.props().text_like() {
        line.push_str(&format!(" {}", format!("{:?}", text).bright_white()));
    }
    if document.selected_id() == Some(node.id()) {
        line.push_str(&format!(" {}", "◀ selected".green()));
    }
    println!("{}", line);

    let child_prefix = match (is_root, is_last) {
        (true, _) => prefix.to_string(),
        (false, true) => format!("{}   ", prefix),
        (false, false) => format!("{}│  ", prefix),
    };

    let children = node.children();
    for (index, child) in children.iter().enumerate() {
        print_node(document, child, &child_prefix, index + 1 == children.len(), false);
    }
}
