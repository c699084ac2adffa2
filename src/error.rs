use serde::Serialize;
use thiserror::Error;

use crate::catalog::Platform;

pub type Result<T> = std::result::Result<T, IconError>;

/// Errors produced by the catalog, renderer, packager and session.
#[derive(Debug, Error)]
pub enum IconError {
    /// Input bytes are not a readable image
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Generate invoked with no uploaded image
    #[error("No source image has been uploaded")]
    EmptyInput,

    /// Download invoked with no generated icons
    #[error("No icons have been generated")]
    Packaging,

    /// Two icons map to the same archive filename
    #[error("Duplicate filename in archive: {0}")]
    DuplicateFilename(String),

    #[error("Invalid size descriptor '{0}'. Expected WIDTHxHEIGHT with positive values")]
    InvalidSize(String),

    #[error("Icon '{label}' does not belong to the {platform} platform")]
    PlatformMismatch { label: String, platform: Platform },

    #[error("Failed to resize image: {0}")]
    Resize(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Another action currently holds the session
    #[error("Icon generation is already in progress")]
    GenerationInProgress,
}

impl IconError {
    /// Severity used when the error is surfaced as a notice
    pub fn level(&self) -> NoticeLevel {
        match self {
            IconError::EmptyInput | IconError::GenerationInProgress => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        }
    }

    /// Short title shown above the message, mirroring the action that failed
    pub fn title(&self) -> &'static str {
        match self {
            IconError::Decode(_) => "Unreadable image",
            IconError::EmptyInput => "No image",
            IconError::Packaging => "No icons",
            IconError::DuplicateFilename(_) | IconError::PlatformMismatch { .. } => {
                "Internal error"
            }
            IconError::GenerationInProgress => "Busy",
            _ => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}
