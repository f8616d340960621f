//! Fatal error taxonomy for DVI stream interpretation.
//!
//! Every condition is fatal — the interpreter performs no silent recovery.
//! All variants carry the byte offset at which the condition was detected so
//! that the corrupt location is locatable from the message alone.

use std::fmt;

/// A fatal condition detected while walking a DVI byte stream.
///
/// The interpreter aborts the current parse as soon as one of these is
/// raised; there is no partial-result mode and no retry. The host decides
/// whether the condition is user-visible as a hard failure or is caught and
/// reported as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DviError {
    /// A read ran past the end of the byte source.
    PrematureEnd {
        /// Position at which the failing read started.
        offset: u64,
    },
    /// The document structure violates the DVI format contract
    /// (missing preamble, missing trailing fill bytes, ...).
    Malformed {
        /// Human-readable description of the violation.
        message: String,
        /// Position at which the violation was detected.
        offset: u64,
    },
    /// An opcode above the highest defined command that is not legalized
    /// by the current version's extension bands.
    UndefinedOpcode {
        /// The offending opcode byte.
        opcode: u8,
        /// Position of the opcode byte.
        offset: u64,
    },
    /// A bop offset read from the page-offset chain does not point at a
    /// bop command.
    BadBopPointer {
        /// The claimed bop offset.
        offset: u64,
    },
    /// A "previous page" pointer in the page-offset chain is neither the
    /// termination sentinel nor strictly less than the current page's
    /// offset (rejects cycles and forward/self pointers).
    InvalidBopOffset {
        /// Position of the offending pointer field.
        offset: u64,
    },
    /// A version identification byte (merged into the version lattice)
    /// that is not one of the recognized DVI dialects.
    UnsupportedVersion {
        /// The merged version value that failed validation.
        value: u8,
        /// Position of the identification byte.
        offset: u64,
    },
    /// An I/O error reported by the underlying byte source.
    Io(String),
}

impl fmt::Display for DviError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DviError::PrematureEnd { offset } => {
                write!(f, "premature end of DVI stream at position {offset}")
            }
            DviError::Malformed { message, offset } => {
                write!(f, "{message} at position {offset}")
            }
            DviError::UndefinedOpcode { opcode, offset } => {
                write!(
                    f,
                    "undefined DVI command (opcode {opcode}) at position {offset}"
                )
            }
            DviError::BadBopPointer { offset } => {
                write!(f, "bop offset at {offset} doesn't point to bop command")
            }
            DviError::InvalidBopOffset { offset } => {
                write!(f, "invalid bop offset at {offset}")
            }
            DviError::UnsupportedVersion { value, offset } => {
                write!(f, "DVI version {value} not supported at position {offset}")
            }
            DviError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DviError {}

impl DviError {
    /// The byte offset attached to this error, if the variant carries one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            DviError::PrematureEnd { offset }
            | DviError::Malformed { offset, .. }
            | DviError::UndefinedOpcode { offset, .. }
            | DviError::BadBopPointer { offset }
            | DviError::InvalidBopOffset { offset }
            | DviError::UnsupportedVersion { offset, .. } => Some(*offset),
            DviError::Io(_) => None,
        }
    }
}
