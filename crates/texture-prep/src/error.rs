use std::path::PathBuf;

/// Errors that can occur while sorting or exporting textures.
///
/// The first four variants are global preconditions and abort an export
/// before anything is written. The rest are scoped to one half of one part
/// and end up inside an [`crate::ExportReport`].
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Rename mode was requested without an all-digit bike number.
    #[error("Invalid bike number {0:?}: expected digits only")]
    InvalidIdentifier(String),

    /// Every slot of every part is unset.
    #[error("No valid textures selected")]
    NoFilesSelected,

    /// The output directory is missing, not a directory, or read-only.
    #[error("Output directory {path} is not writable: {message}")]
    DestinationUnwritable { path: PathBuf, message: String },

    /// A slot string did not name one of the eight known slots.
    #[error("Unknown slot {0:?}")]
    UnknownSlot(String),

    /// A selected source path does not exist or is not a regular file.
    #[error("Source file not found: {0}")]
    MissingSourceFile(PathBuf),

    /// Failed to decode a metallic map.
    #[error("Image decode error for {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    /// Failed to encode or write a PNG.
    #[error("Image encode error for {path}: {message}")]
    ImageEncode { path: PathBuf, message: String },

    /// The computed output path is the source file itself.
    #[error("Output would overwrite its own source: {0}")]
    OutputOverwritesSource(PathBuf),

    /// I/O error copying or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
