//! dvistream-core: Backend-independent data types for dvistream-rs.
//!
//! This crate provides the foundational types shared by the DVI command-stream
//! interpreter: the version lattice ([`DviVersion`], [`VersionState`]), the
//! opcode band constants ([`opcode`]), and the fatal error taxonomy
//! ([`DviError`]). It carries no parsing logic and no I/O.

pub mod error;
pub mod opcode;
pub mod version;

pub use error::DviError;
pub use version::{DviVersion, VersionState};
