//! Embeddable core library for apkstamp.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for calling
//! from a build script or another host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`GitPort`](ports::GitPort): query git state
//! - [`EnvPort`](ports::EnvPort): read signing variables
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides default process/filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`VersionResolver`](resolver::VersionResolver): version code and suffix, with fallbacks
//! - [`run_manifest`](pipeline::run_manifest): the full build manifest for one variant

pub mod adapters;
pub mod artifact;
pub mod pipeline;
pub mod ports;
pub mod resolver;
pub mod settings;
pub mod signing;

pub use apkstamp_git::GitError;
pub use apkstamp_types::identity::{
    BuildIdentity, BuildKind, FALLBACK_SUFFIX, FALLBACK_VERSION_CODE,
};
