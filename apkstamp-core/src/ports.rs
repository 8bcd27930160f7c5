//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;

pub use apkstamp_git::GitPort;

/// Environment variable lookups.
pub trait EnvPort {
    fn var(&self, key: &str) -> Option<String>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
