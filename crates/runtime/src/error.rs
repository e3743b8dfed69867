//! Error types surfaced by the runtime.
//!
//! Core failures (dispatch, frames) pass through unchanged so callers can
//! still read their `GameError` codes.
use std::path::PathBuf;

use hexbound_core::{DispatchError, FrameError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content: {0}")]
    Content(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("failed to encode state")]
    Encode(#[source] bincode::Error),
}

impl RuntimeError {
    pub(crate) fn content(error: impl std::fmt::Display) -> Self {
        Self::Content(format!("{error:#}"))
    }
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("replay is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("replay rejected with {} error(s); first: {}", errors.len(), errors.first().map_or("", String::as_str))]
    Rejected { errors: Vec<String> },
}
