//! # Studio Editor
//!
//! Document editing engine for the Studio block builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: block types, props, nodes, palette   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Pure tree edits with structural sharing  │
//! │  - Selection and preview state              │
//! │  - Session: version, flush, notifications   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: live view (HTML), export (TSX)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use studio_editor::{EditSession, MemoryStore, Mutation};
//!
//! let mut session = EditSession::open(MemoryStore::new());
//! session.apply(Mutation::Select { node_id: Some("h1".into()) })?;
//! session.update_selected(patch)?;
//! ```

mod document;
mod errors;
mod mutations;
mod session;
mod store;
pub mod tree;
mod view;

pub use document::{Document, DocumentSnapshot};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError};
pub use session::{EditSession, MutationResult, Notification};
pub use store::{MemorySink, MemoryStore, ProjectSink, Store, StoreError};
pub use view::{Affordances, PropertiesPanel, PropertyField};
