//! DVI dialect detection as a monotonic lattice.
//!
//! The dialect is discovered mid-parse from identification bytes in the
//! preamble and post_post records. Once raised, it never decreases: a later
//! identification byte can only widen the set of legal extension opcodes.

use crate::error::DviError;

/// A recognized DVI dialect, ordered by its format identification value.
///
/// The numeric discriminants are the identification bytes written by the
/// producing engines, so the lattice merge is a plain numeric `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DviVersion {
    /// Standard DVI as emitted by TeX (id 2).
    Standard = 2,
    /// pTeX's dialect adding the direction-toggle opcode (id 3).
    Ptex = 3,
    /// XeTeX XDV, oldest sub-version (id 5).
    Xdv5 = 5,
    /// XeTeX XDV sub-version 6.
    Xdv6 = 6,
    /// XeTeX XDV sub-version 7.
    Xdv7 = 7,
}

impl DviVersion {
    /// Maps an identification byte to its dialect, if recognized.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            2 => Some(DviVersion::Standard),
            3 => Some(DviVersion::Ptex),
            5 => Some(DviVersion::Xdv5),
            6 => Some(DviVersion::Xdv6),
            7 => Some(DviVersion::Xdv7),
            _ => None,
        }
    }

    /// The identification byte of this dialect.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Whether this dialect enables any of the XDV extension opcodes.
    pub fn is_xdv(self) -> bool {
        matches!(self, DviVersion::Xdv5 | DviVersion::Xdv6 | DviVersion::Xdv7)
    }
}

/// Tracks the discovered dialect across a parse.
///
/// Starts with no version discovered; [`observe`](VersionState::observe)
/// merges identification bytes with `max` and validates the merged value.
/// Only the preamble and post_post executors legitimately feed it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VersionState {
    current: Option<DviVersion>,
}

impl VersionState {
    /// A state with no version discovered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialect discovered so far, used to gate extension decoding.
    pub fn current(&self) -> Option<DviVersion> {
        self.current
    }

    /// Merges an identification byte into the lattice.
    ///
    /// The merged value `max(current, id)` is validated, not the raw byte:
    /// an unrecognized low id observed after a higher version is absorbed.
    ///
    /// # Errors
    ///
    /// [`DviError::UnsupportedVersion`] when the merged value is not a
    /// recognized dialect, reporting `offset` as the position of the
    /// identification byte.
    pub fn observe(&mut self, id: u8, offset: u64) -> Result<DviVersion, DviError> {
        let merged = self.current.map_or(0, DviVersion::id).max(id);
        match DviVersion::from_id(merged) {
            Some(version) => {
                self.current = Some(version);
                Ok(version)
            }
            None => Err(DviError::UnsupportedVersion {
                value: merged,
                offset,
            }),
        }
    }
}
