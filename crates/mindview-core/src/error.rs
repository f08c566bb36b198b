use crate::document::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Duplicate node id: {id}")]
    DuplicateNodeId { id: NodeId },

    #[error("Invalid viewer config: {message}")]
    InvalidConfig { message: String },

    #[error("Mind-map document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
