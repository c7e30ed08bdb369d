//! Machine-level errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong while building or capturing a Spectrum.
///
/// Decode-level oddities (odd ports, unmapped keys, ROM writes) are never
/// errors; they resolve to a default value instead.
#[derive(Debug, Error)]
pub enum SpectrumError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("ROM image must be exactly {expected} bytes, got {actual}")]
    RomSize { expected: usize, actual: usize },

    #[error("SCREEN$ image must be exactly {expected} bytes, got {actual}")]
    ScreenSize { expected: usize, actual: usize },

    #[cfg(feature = "native")]
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[cfg(feature = "native")]
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("host: {0}")]
    Host(String),
}

impl SpectrumError {
    /// Attach a path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
