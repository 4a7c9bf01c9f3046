use crate::BlockType;
use thiserror::Error;

/// Errors raised at the model boundary (palette payloads, props, snapshots)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Invalid props for {block_type}: {message}")]
    InvalidProps {
        block_type: BlockType,
        message: String,
    },

    #[error("Malformed palette payload: {0}")]
    MalformedPayload(String),
}

impl ModelError {
    pub(crate) fn invalid_props(block_type: BlockType, message: impl ToString) -> Self {
        ModelError::InvalidProps {
            block_type,
            message: message.to_string(),
        }
    }
}
