//! Shared DTOs (schemas-as-code) for the apkstamp workspace.
//!
//! # Design constraints
//! - [`manifest::BuildManifest`] is serialized to disk and read by build scripts.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod identity;
pub mod manifest;

/// Schema identifiers.
pub mod schema {
    pub const APKSTAMP_MANIFEST_V1: &str = "apkstamp.manifest.v1";
}
