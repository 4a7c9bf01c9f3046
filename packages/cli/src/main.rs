mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    create, deselect, duplicate, export, init, insert, list_projects, move_child, open, palette,
    preview, remove, rename, render, reparent, save, select, set, tree, CreateArgs,
    DuplicateArgs, ExportArgs, InitArgs, InsertArgs, MoveArgs, OpenArgs, PreviewArgs, RemoveArgs,
    RenameArgs, RenderArgs, ReparentArgs, SelectArgs, SetArgs, TreeArgs,
};
use tracing_subscriber::EnvFilter;

/// Studio CLI - visual page builder from the terminal
#[derive(Parser, Debug)]
#[command(name = "studio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a seeded working document
    Init(InitArgs),

    /// List the block palette
    Palette,

    /// Show the block tree and the selected block's properties
    Tree(TreeArgs),

    /// Insert a block from the palette
    Insert(InsertArgs),

    /// Update props of a block
    Set(SetArgs),

    /// Select a block
    Select(SelectArgs),

    /// Clear the selection
    Deselect,

    /// Remove a block and its children
    Remove(RemoveArgs),

    /// Reorder a child within its parent
    Move(MoveArgs),

    /// Move a block under another parent
    Reparent(ReparentArgs),

    /// Duplicate a block (fresh ids) right after itself
    Duplicate(DuplicateArgs),

    /// Switch between editing and preview mode
    Preview(PreviewArgs),

    /// Rename the document
    Rename(RenameArgs),

    /// Render the live view as HTML
    Render(RenderArgs),

    /// Export the page as a TSX component
    Export(ExportArgs),

    /// Save the working document as a new project version
    Save,

    /// Register an empty project
    Create(CreateArgs),

    /// List saved projects, newest first
    Projects,

    /// Load the latest version of a project into the working document
    Open(OpenArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Palette => palette(),
        Command::Tree(args) => tree(args, &cwd),
        Command::Insert(args) => insert(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Select(args) => select(args, &cwd),
        Command::Deselect => deselect(&cwd),
        Command::Remove(args) => remove(args, &cwd),
        Command::Move(args) => move_child(args, &cwd),
        Command::Reparent(args) => reparent(args, &cwd),
        Command::Duplicate(args) => duplicate(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
        Command::Rename(args) => rename(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Save => save(&cwd),
        Command::Create(args) => create(args, &cwd),
        Command::Projects => list_projects(&cwd),
        Command::Open(args) => open(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
