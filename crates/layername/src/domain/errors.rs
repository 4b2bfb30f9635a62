//! Domain-specific errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("selection index {index} is out of range for {len} selected objects")]
    SelectionIndexOutOfRange { index: usize, len: usize },
    #[error("unsupported document format: {}", .0.display())]
    UnsupportedDocument(PathBuf),
}
