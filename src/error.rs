//! Error taxonomy.
//!
//! Every error here is recoverable: the worst outcome for the caller is an
//! unchanged diagram plus a message.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected structural edits. The diagram and its history are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("no node with id '{id}'")]
    UnknownNode { id: String },

    #[error("a node with id '{id}' already exists")]
    DuplicateNode { id: String },

    #[error("connection {from} --> {to} already exists")]
    DuplicateConnection { from: String, to: String },

    #[error("position of '{id}' must be finite")]
    NonFinitePosition { id: String },
}

impl EditError {
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }
}

/// Problems with user input, detected before any network call.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no text provided")]
    EmptyText,

    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    #[error("invalid file type '{extension}'. Allowed: txt, md, docx, pdf")]
    UnsupportedFileType { extension: String },

    #[error("file is too large ({size} bytes). Maximum is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures talking to the text-to-diagram service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service rejected the document: {message}")]
    Rejected { message: String },

    #[error("malformed service payload: {reason}")]
    MalformedPayload { reason: String },

    #[cfg(feature = "service")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ServiceError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] crate::renderers::raster::RasterError),
}
