//! # Studio Model
//!
//! Document model for the Studio block builder: the closed set of block
//! types, their typed props and default templates, block nodes, id minting,
//! the palette, and the type → element mapping every renderer shares.

mod block;
mod error;
mod id_generator;
mod node;
mod palette;
mod props;
pub mod semantics;

pub use block::BlockType;
pub use error::ModelError;
pub use id_generator::{get_seed, IdGenerator};
pub use node::{Node, NodeId, ROOT_ID};
pub use palette::{palette, palette_item, PaletteItem, PalettePayload, Template};
pub use props::{
    Align, ButtonKind, ButtonProps, HeadingProps, ImageProps, InputKind, InputProps, LayoutProps,
    ParagraphProps, PropMap, Props,
};
