//! # Studio Workspace
//!
//! On-disk backends for the editor's persistence boundaries: the working
//! document file ([`LocalStore`]) and the project/version database
//! ([`ProjectStore`]).

mod fs;
pub mod local;
pub mod projects;

pub use local::LocalStore;
pub use projects::{ProjectRecord, ProjectStore, ProjectVersions, VersionRecord, DEFAULT_PROJECT_NAME};
