//! Loadable external sources for palette, schema and registry documents.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// One candidate location for an external document.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Human-readable name used in notices and logs.
    fn label(&self) -> String;

    /// Loads the raw document text.
    async fn load(&self) -> Result<String, SourceError>;
}

/// Document read from the local file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResourceSource for FileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| SourceError::Io {
                source_label: self.label(),
                message: err.to_string(),
            })
    }
}

/// Document embedded by the caller, e.g. bundled with the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSource {
    label: String,
    text: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl ResourceSource for InlineSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    async fn load(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}

/// Soft failure of one source attempt.
///
/// Never surfaced to callers as an error; the resolver records it and moves
/// on to the next candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Io {
        source_label: String,
        message: String,
    },
    Timeout {
        source_label: String,
        after_ms: u128,
    },
    Parse {
        source_label: String,
        message: String,
    },
    Unavailable {
        source_label: String,
        reason: String,
    },
}

impl SourceError {
    pub fn source_label(&self) -> &str {
        match self {
            Self::Io { source_label, .. }
            | Self::Timeout { source_label, .. }
            | Self::Parse { source_label, .. }
            | Self::Unavailable { source_label, .. } => source_label,
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                source_label,
                message,
            } => write!(f, "source `{source_label}` could not be read: {message}"),
            Self::Timeout {
                source_label,
                after_ms,
            } => write!(f, "source `{source_label}` timed out after {after_ms}ms"),
            Self::Parse {
                source_label,
                message,
            } => write!(f, "source `{source_label}` is malformed: {message}"),
            Self::Unavailable {
                source_label,
                reason,
            } => write!(f, "source `{source_label}` is unavailable: {reason}"),
        }
    }
}

impl Error for SourceError {}
