//! Error types for the byte cursor and interpreter layers.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`ReaderError`]
//! that wraps I/O failures and converts to the unified [`DviError`] taxonomy.

use dvistream_core::DviError;
use thiserror::Error;

/// Error type for byte-cursor and interpreter operations.
///
/// Wraps I/O errors from the underlying byte source and provides conversion
/// to [`DviError`] for unified error handling across the library.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Error reported by the underlying byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A read ran past the end of the byte source. The payload is the
    /// position at which the failing read started.
    #[error("premature end of DVI stream at position {0}")]
    PrematureEnd(u64),

    /// A structural error from the interpreter layer.
    #[error(transparent)]
    Dvi(#[from] DviError),
}

impl From<ReaderError> for DviError {
    fn from(err: ReaderError) -> Self {
        match err {
            ReaderError::Io(e) => DviError::Io(e.to_string()),
            ReaderError::PrematureEnd(offset) => DviError::PrematureEnd { offset },
            ReaderError::Dvi(e) => e,
        }
    }
}
