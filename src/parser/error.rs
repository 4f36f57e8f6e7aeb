use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported document type: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid post JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Front matter starting on line 1 is never closed with ---")]
    UnterminatedFrontMatter,
}

pub type Result<T> = std::result::Result<T, DocumentError>;
