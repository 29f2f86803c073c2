/// Convenience result type used across carnet.
pub type CarnetResult<T> = Result<T, CarnetError>;

/// Top-level error taxonomy used by editor, loader and export APIs.
///
/// The render pipeline itself never returns one of these; draw sites are guarded by readiness
/// checks and raster failures are logged and skipped.
#[derive(thiserror::Error, Debug)]
pub enum CarnetError {
    /// A selected file is not an image (`image/*` MIME type required).
    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A file could not be read.
    #[error("read error: {0}")]
    Read(String),

    /// Encoding or writing the exported PNG failed.
    #[error("export error: {0}")]
    Export(String),

    /// Invalid user-provided configuration or field data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CarnetError {
    /// Build a [`CarnetError::InvalidFileType`] value.
    pub fn invalid_file_type(msg: impl Into<String>) -> Self {
        Self::InvalidFileType(msg.into())
    }

    /// Build a [`CarnetError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CarnetError::Read`] value.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Build a [`CarnetError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`CarnetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
