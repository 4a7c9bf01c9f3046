mod compiler;
mod context;

pub use compiler::{compile_page, component_name, export_file_name};
pub use context::CompileOptions;
