use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate block ids: {}", .0.join(", "))]
    DuplicateIds(Vec<String>),
}
