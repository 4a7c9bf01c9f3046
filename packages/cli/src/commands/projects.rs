use super::{open_session, print_notifications};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use studio_editor::Store;
use studio_workspace::{LocalStore, ProjectStore};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name (blank uses the default name)
    #[arg(default_value = "")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Project to load into the working document
    pub name: String,
}

/// Save the working document as a new version of its project
pub fn save(cwd: &str) -> Result<()> {
    let (config, mut session) = open_session(cwd)?;
    let mut projects = ProjectStore::open(config.projects_path(cwd))?;

    let saved = session.save_project(&mut projects);
    print_notifications(&mut session);

    if !saved {
        bail!("Save failed");
    }

    if let Some(version) = projects.latest_version(session.document().name()) {
        println!("    version {}", version.version.to_string().bright_white());
    }
    Ok(())
}

/// Register a project without saving a version
pub fn create(args: CreateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut projects = ProjectStore::open(config.projects_path(cwd))?;

    let record = projects.create_project(&args.name)?;
    println!(
        "  {} Project {} (id {})",
        "✓".green(),
        record.name.bright_white(),
        record.id
    );
    Ok(())
}

pub fn list_projects(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let projects = ProjectStore::open(config.projects_path(cwd))?;

    let records = projects.list_projects();
    if records.is_empty() {
        println!("{}", "⚠️  No saved projects".yellow());
        return Ok(());
    }

    println!("{}", "📁 Projects".bright_blue().bold());
    for record in records {
        let versions = projects.versions(&record.name).len();
        println!(
            "  {:<24} {} {}",
            record.name.bright_white(),
            format!("{} version(s)", versions).cyan(),
            format!("updated {}", record.updated_at.format("%Y-%m-%d %H:%M")).dimmed()
        );
    }
    Ok(())
}

/// Replace the working document with the latest version of a project
pub fn open(args: OpenArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let projects = ProjectStore::open(config.projects_path(cwd))?;

    let document = projects.latest_document(&args.name)?;
    let mut local = LocalStore::new(config.state_path(cwd));
    local.save(&document)?;

    println!("  {} Opened {}", "✓".green(), document.name().bright_white());
    Ok(())
}
