//! Pack configuration loader.

use std::path::Path;

use pack_core::PackConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for pack configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults, so older config files keep loading.
    pub fn load(path: &Path) -> LoadResult<PackConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<PackConfig> {
        let config: PackConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("game_seed = 7\n").unwrap();
        assert_eq!(config.game_seed, 7);
        assert_eq!(config.max_strikes, PackConfig::default().max_strikes);
        assert_eq!(config.proc_rate_cap, PackConfig::default().proc_rate_cap);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), PackConfig::default());
    }
}
