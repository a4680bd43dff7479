//! Content loaders for reading pack data from files.
//!
//! Each loader turns one RON/TOML file into pack-core types; the
//! [`ContentFactory`] knows where the files live inside a data directory.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod map;
pub mod scenario;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use scenario::{CombatScript, Scenario, ScenarioLoader, UnitSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses designer RON. `Some(..)` may be omitted around optional values.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::Options::default()
        .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
        .from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
