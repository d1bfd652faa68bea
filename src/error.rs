use std::io;
use thiserror::Error;
use serde::{Serialize, Deserialize};

use crate::models::PostId;

/// Raised when an action names a post the store does not hold.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("post {0} not found")]
pub struct NotFoundError(pub PostId);

#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Seed contains post {0} more than once")]
    DuplicatePost(PostId),

    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Json(err.to_string())
    }
}

impl From<io::Error> for FeedError {
    fn from(err: io::Error) -> Self {
        FeedError::Io(err.to_string())
    }
}
