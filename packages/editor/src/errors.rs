//! Error types for the editor

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum EditorError {
    /// Rejected locally before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend has no page under this slug
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Any other network or server failure; local state is untouched
    #[error("Request failed: {0}")]
    Request(#[from] ApiError),

    #[error("No page is loaded")]
    NoPage,

    #[error("Invalid page status: {0}")]
    InvalidStatus(String),
}

impl EditorError {
    /// Whether retrying the same action could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, EditorError::Request(_))
    }
}
