//! # Studio HTML Compiler
//!
//! Live view of a block tree: a virtual DOM (`render_preview`,
//! `render_canvas`) and its HTML serialization.

mod compiler;
mod render;
mod vdom;

#[cfg(test)]
mod tests;

pub use compiler::{compile_to_html, escape_html, to_html, CompileOptions};
pub use render::{render_canvas, render_document, render_preview};
pub use vdom::VNode;
