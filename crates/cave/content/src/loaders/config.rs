//! Level tunables loader.

use std::path::Path;

use cave_core::CaveConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for level tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tunables from a TOML file.
    ///
    /// Keys missing from the file keep their [`CaveConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<CaveConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CaveConfig> {
        let config: CaveConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse cave config TOML: {}", e))?;

        if config.object_list_incr == 0 {
            anyhow::bail!("object_list_incr must be at least 1");
        }
        if config.level_monster_max < 2 {
            anyhow::bail!(
                "level_monster_max must leave room past the reserved slot 0 (got {})",
                config.level_monster_max
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CaveConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ConfigLoader::parse("object_list_size = 16\nscatter_max_tries = 500\n").unwrap();
        assert_eq!(config.object_list_size, 16);
        assert_eq!(config.scatter_max_tries, 500);
        assert_eq!(config.object_list_incr, CaveConfig::DEFAULT_OBJECT_LIST_INCR);
        assert_eq!(config.level_monster_max, CaveConfig::DEFAULT_LEVEL_MONSTER_MAX);
    }

    #[test]
    fn test_zero_increment_is_rejected() {
        let err = ConfigLoader::parse("object_list_incr = 0").unwrap_err();
        assert!(err.to_string().contains("object_list_incr"));
    }

    #[test]
    fn test_tiny_monster_array_is_rejected() {
        assert!(ConfigLoader::parse("level_monster_max = 1").is_err());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(ConfigLoader::parse("object_list_size = \"lots\"").is_err());
    }
}
