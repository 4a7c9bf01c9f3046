pub mod edit;
pub mod export;
pub mod init;
pub mod inspect;
pub mod projects;

pub use edit::{
    deselect, duplicate, insert, move_child, preview, remove, rename, reparent,
    select, set, DuplicateArgs, InsertArgs, MoveArgs, PreviewArgs, RemoveArgs, RenameArgs,
    ReparentArgs, SelectArgs, SetArgs,
};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use inspect::{palette, render, tree, RenderArgs, TreeArgs};
pub use projects::{create, list_projects, open, save, CreateArgs, OpenArgs};

use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use studio_editor::{EditSession, Notification, Store};
use studio_workspace::LocalStore;

/// Open an edit session over the configured working document
pub(crate) fn open_session(cwd: &str) -> Result<(Config, EditSession<LocalStore>)> {
    let config = Config::load(cwd)?;
    let store = LocalStore::new(config.state_path(cwd));
    tracing::debug!(path = %store.path().display(), "opening working document");
    let mut session = EditSession::open(store);
    print_notifications(&mut session);
    Ok((config, session))
}

/// Print and drain pending session notifications
pub(crate) fn print_notifications<S: Store>(session: &mut EditSession<S>) {
    for notification in session.take_notifications() {
        match notification {
            Notification::Saved { .. } => println!("  {} {}", "✓".green(), notification),
            _ => eprintln!("  {} {}", "⚠️".yellow(), notification.to_string().yellow()),
        }
    }
}
