//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable overriding the content directory.
pub const DATA_DIR_ENV: &str = "PACK_DATA_DIR";

/// Content directory: explicit flag, then `PACK_DATA_DIR`, then `./data`.
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}
