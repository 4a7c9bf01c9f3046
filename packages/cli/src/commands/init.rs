use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use studio_editor::{Document, Store};
use studio_workspace::LocalStore;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name
    #[arg(short, long, default_value = "MyApp")]
    pub name: String,

    /// Force overwrite existing config and working document
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    println!("{}", "📝 Initializing Studio project...".bright_blue().bold());

    let config = if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        Config::load(cwd)?
    } else {
        let config = Config::default();
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
        config
    };

    let mut store = LocalStore::new(config.state_path(cwd));
    if store.path().exists() && !args.force {
        println!(
            "  {} {} already exists (use --force to reset)",
            "⚠️".yellow(),
            config.state_file.bright_white()
        );
    } else {
        store.save(&Document::seed(args.name.as_str()))?;
        println!("  {} Created {}", "✓".green(), config.state_file);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: studio palette");
    println!("  2. Run: studio insert heading --parent c1");
    println!("  3. Run: studio export");

    Ok(())
}
