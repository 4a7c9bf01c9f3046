use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use studio_compiler_react::{compile_page, export_file_name, CompileOptions};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit plain JSX without type annotations
    #[arg(long)]
    pub js: bool,

    /// Stylesheet to import at the top of the page
    #[arg(long)]
    pub css: Option<String>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let (config, session) = open_session(cwd)?;
    let document = session.document();

    let options = CompileOptions {
        use_typescript: !args.js,
        css_import: args.css,
        ..Default::default()
    };
    let code = compile_page(document.name(), document.root(), options);

    if args.stdout {
        print!("{}", code);
        return Ok(());
    }

    let out_dir = match args.out_dir {
        Some(dir) => PathBuf::from(cwd).join(dir),
        None => config.out_dir(cwd),
    };
    fs::create_dir_all(&out_dir)?;

    let output_path = out_dir.join(export_file_name(document.name()));
    fs::write(&output_path, code)?;

    println!("  {} {} → {}", "✓".green(), document.name(), output_path.display());
    Ok(())
}
