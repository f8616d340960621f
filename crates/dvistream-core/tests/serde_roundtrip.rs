//! Serde serialization/deserialization round-trip tests.
//!
//! Verifies that the public data types serialize to JSON and deserialize
//! back, producing equal values.

#![cfg(feature = "serde")]

use dvistream_core::{DviError, DviVersion};

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

#[test]
fn test_serde_dvi_version() {
    roundtrip(&DviVersion::Standard);
    roundtrip(&DviVersion::Ptex);
    roundtrip(&DviVersion::Xdv5);
    roundtrip(&DviVersion::Xdv6);
    roundtrip(&DviVersion::Xdv7);
}

#[test]
fn test_serde_dvi_error() {
    roundtrip(&DviError::PrematureEnd { offset: 42 });
    roundtrip(&DviError::Malformed {
        message: "missing fill bytes at end of file".to_string(),
        offset: 7,
    });
    roundtrip(&DviError::UndefinedOpcode {
        opcode: 250,
        offset: 3,
    });
    roundtrip(&DviError::BadBopPointer { offset: 90 });
    roundtrip(&DviError::InvalidBopOffset { offset: 131 });
    roundtrip(&DviError::UnsupportedVersion {
        value: 4,
        offset: 1,
    });
    roundtrip(&DviError::Io("broken pipe".to_string()));
}
