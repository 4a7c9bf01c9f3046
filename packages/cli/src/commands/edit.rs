use super::{open_session, print_notifications};
use anyhow::{anyhow, bail, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::str::FromStr;
use studio_editor::{Mutation, MutationResult};
use studio_model::{palette_item, BlockType, NodeId, PropMap};

#[derive(Debug, Args)]
pub struct InsertArgs {
    /// Block type (section, container, heading, paragraph, button, image, input, form, card, list)
    pub block_type: String,

    /// Parent block id (defaults to the root)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Props as a JSON object, replacing the palette sample props
    #[arg(long)]
    pub props: Option<String>,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Props as key=value pairs; `key=null` clears an optional prop
    #[arg(required = true)]
    pub props: Vec<String>,

    /// Block to edit (defaults to the selection)
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Parent whose children are reordered
    pub parent: String,

    pub from: usize,

    /// Target position (clamped to the last child)
    pub to: usize,
}

#[derive(Debug, Args)]
pub struct ReparentArgs {
    pub id: String,

    pub new_parent: String,

    /// Position among the new siblings (defaults to last)
    #[arg(short, long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct DuplicateArgs {
    pub id: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PreviewMode {
    On,
    Off,
    Toggle,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[arg(value_enum, default_value = "toggle")]
    pub mode: PreviewMode,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub name: String,
}

pub fn insert(args: InsertArgs, cwd: &str) -> Result<()> {
    let block_type = BlockType::from_str(&args.block_type)?;
    let mut payload = palette_item(block_type).payload();
    if let Some(json) = &args.props {
        payload.sample_props = parse_props_json(json)?;
    }

    let (_, mut session) = open_session(cwd)?;
    let (result, id) = session.insert_from_palette(&payload, args.parent.as_deref())?;

    if result.changed {
        println!("  {} Inserted {} {}", "✓".green(), block_type, id.to_string().bright_white());
    } else {
        println!(
            "  {} Parent {} not found, nothing inserted",
            "•".yellow(),
            args.parent.as_deref().unwrap_or("root")
        );
    }
    print_notifications(&mut session);
    Ok(())
}

pub fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let mut patch = PropMap::new();
    for raw in &args.props {
        let (key, value) = parse_prop(raw)?;
        patch.insert(key, value);
    }

    let (_, mut session) = open_session(cwd)?;
    let node_id = match args.id {
        Some(id) => NodeId::from(id),
        None => session
            .document()
            .selected_id()
            .cloned()
            .ok_or_else(|| anyhow!("Nothing selected; pass --id or run `studio select <id>`"))?,
    };

    let result = session.apply(Mutation::UpdateProps {
        node_id,
        props: patch,
    })?;
    report("update_props", result);
    print_notifications(&mut session);
    Ok(())
}

pub fn select(args: SelectArgs, cwd: &str) -> Result<()> {
    apply_mutation(
        Mutation::Select {
            node_id: Some(NodeId::from(args.id)),
        },
        cwd,
    )
}

pub fn deselect(cwd: &str) -> Result<()> {
    apply_mutation(Mutation::Select { node_id: None }, cwd)
}

pub fn remove(args: RemoveArgs, cwd: &str) -> Result<()> {
    apply_mutation(
        Mutation::RemoveNode {
            node_id: NodeId::from(args.id),
        },
        cwd,
    )
}

pub fn move_child(args: MoveArgs, cwd: &str) -> Result<()> {
    apply_mutation(
        Mutation::MoveChild {
            parent_id: NodeId::from(args.parent),
            from_index: args.from,
            to_index: args.to,
        },
        cwd,
    )
}

pub fn reparent(args: ReparentArgs, cwd: &str) -> Result<()> {
    apply_mutation(
        Mutation::MoveNode {
            node_id: NodeId::from(args.id),
            new_parent_id: NodeId::from(args.new_parent),
            index: args.index.unwrap_or(usize::MAX),
        },
        cwd,
    )
}

pub fn duplicate(args: DuplicateArgs, cwd: &str) -> Result<()> {
    apply_mutation(
        Mutation::DuplicateNode {
            node_id: NodeId::from(args.id),
        },
        cwd,
    )
}

pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let (_, mut session) = open_session(cwd)?;
    let enabled = match args.mode {
        PreviewMode::On => true,
        PreviewMode::Off => false,
        PreviewMode::Toggle => !session.document().is_preview(),
    };

    session.apply(Mutation::SetPreview { enabled })?;
    let mode = if enabled { "preview" } else { "editing" };
    println!("  {} Mode: {}", "✓".green(), mode.bright_white());
    print_notifications(&mut session);
    Ok(())
}

pub fn rename(args: RenameArgs, cwd: &str) -> Result<()> {
    apply_mutation(Mutation::Rename { name: args.name }, cwd)
}

/// Open the working document, apply one mutation and report the outcome
pub fn apply_mutation(mutation: Mutation, cwd: &str) -> Result<()> {
    let (_, mut session) = open_session(cwd)?;
    let name = mutation.name();
    let result = session.apply(mutation)?;
    report(name, result);
    print_notifications(&mut session);
    Ok(())
}

fn report(name: &str, result: MutationResult) {
    if result.changed {
        println!("  {} {}", "✓".green(), name);
    } else {
        println!("  {} {}: nothing changed (target not found)", "•".yellow(), name);
    }
}

/// `key=value` → prop entry. `level` is numeric, `null` clears, everything
/// else is a string.
fn parse_prop(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Expected key=value, got `{}`", raw);
    };

    let value = match (key, value) {
        (_, "null") => Value::Null,
        ("level", level) => Value::from(
            level
                .parse::<u64>()
                .map_err(|_| anyhow!("level must be a number, got `{}`", level))?,
        ),
        (_, text) => Value::String(text.to_string()),
    };

    Ok((key.to_string(), value))
}

fn parse_props_json(json: &str) -> Result<PropMap> {
    match serde_json::from_str(json)? {
        Value::Object(map) => Ok(map),
        _ => bail!("--props must be a JSON object"),
    }
}
