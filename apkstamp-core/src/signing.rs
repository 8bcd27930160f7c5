//! Release signing configuration read from the environment.
//!
//! Signing is opt-in: it is configured only for release builds and only
//! when `KEYSTORE_PATH` is set to a non-blank value. Missing variables never
//! fail the build.

use crate::ports::EnvPort;
use apkstamp_types::identity::BuildKind;
use apkstamp_types::manifest::SigningSummary;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::debug;

pub const KEYSTORE_PATH_VAR: &str = "KEYSTORE_PATH";
pub const KEYSTORE_PASSWORD_VAR: &str = "KEYSTORE_PASSWORD";
pub const KEY_ALIAS_VAR: &str = "KEY_ALIAS";
pub const KEY_PASSWORD_VAR: &str = "KEY_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub store_file: Utf8PathBuf,
    pub store_password: Option<String>,
    pub key_alias: Option<String>,
    pub key_password: Option<String>,
    pub v2_signing: bool,
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("store_file", &self.store_file)
            .field("store_password", &redact(&self.store_password))
            .field("key_alias", &self.key_alias)
            .field("key_password", &redact(&self.key_password))
            .field("v2_signing", &self.v2_signing)
            .finish()
    }
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl SigningConfig {
    /// `None` when `KEYSTORE_PATH` is unset or blank. A relative keystore
    /// path is taken relative to `repo_root`, not the process directory.
    pub fn from_env(env: &dyn EnvPort, repo_root: &Utf8Path) -> Option<Self> {
        let Some(store_file) = env.var(KEYSTORE_PATH_VAR).filter(|p| !p.trim().is_empty()) else {
            debug!("{} not set, release signing disabled", KEYSTORE_PATH_VAR);
            return None;
        };

        let store_file = Utf8PathBuf::from(store_file.trim());
        let store_file = if store_file.is_relative() {
            repo_root.join(store_file)
        } else {
            store_file
        };

        Some(Self {
            store_file,
            store_password: env.var(KEYSTORE_PASSWORD_VAR),
            key_alias: env.var(KEY_ALIAS_VAR),
            key_password: env.var(KEY_PASSWORD_VAR),
            v2_signing: true,
        })
    }

    pub fn summary(&self) -> SigningSummary {
        SigningSummary {
            store_file: self.store_file.clone(),
            key_alias: self.key_alias.clone(),
            has_store_password: self.store_password.is_some(),
            has_key_password: self.key_password.is_some(),
            v2_signing: self.v2_signing,
        }
    }
}

/// Signing for `kind`; debug builds are never signed here.
pub fn resolve_signing(
    kind: BuildKind,
    env: &dyn EnvPort,
    repo_root: &Utf8Path,
) -> Option<SigningConfig> {
    match kind {
        BuildKind::Debug => None,
        BuildKind::Release => SigningConfig::from_env(env, repo_root),
    }
}
