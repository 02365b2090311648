//! Error types for skillsmith.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SmithError>;

#[derive(Debug, Error)]
pub enum SmithError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid page range: {0}")]
    PageRange(String),

    #[error("invalid skill: {0}")]
    InvalidSkill(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("smoke test failed: {0}")]
    SmokeTestFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A failure whose output the command already wrote.
    #[error(transparent)]
    Reported(Box<SmithError>),
}

impl SmithError {
    /// Mark this failure as already shown to the user, so `main` only sets
    /// the exit code.
    #[must_use]
    pub fn reported(self) -> Self {
        match self {
            Self::Reported(_) => self,
            other => Self::Reported(Box::new(other)),
        }
    }

    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }

    /// Stable machine-readable code for robot output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reported(inner) => inner.code(),
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::PageRange(_) => "page_range",
            Self::InvalidSkill(_) => "invalid_skill",
            Self::ValidationFailed(_) => "validation_failed",
            Self::SmokeTestFailed(_) => "smoke_test_failed",
            Self::NotFound(_) => "not_found",
            Self::AlreadyExists(_) => "already_exists",
            Self::Pdf(_) => "pdf",
            Self::Archive(_) => "archive",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Reported(inner) => inner.exit_code(),
            Self::SmokeTestFailed(_) => 2,
            _ => 1,
        }
    }
}
