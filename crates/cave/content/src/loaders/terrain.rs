//! Terrain table loader.

use std::collections::HashSet;
use std::path::Path;

use cave_core::{Feature, FeatureTable, TerrainFlags};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Terrain table bundled with the crate.
const BUILTIN_TERRAIN: &str = include_str!("../../data/terrain.ron");

/// One terrain entry as written in the data file.
///
/// Flags are written the way `bitflags` prints them, e.g. `"LOS | PROJECT"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainRecord {
    pub name: String,
    pub glyph: char,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub digging: u8,
    #[serde(default)]
    pub flags: TerrainFlags,
}

impl From<TerrainRecord> for Feature {
    fn from(record: TerrainRecord) -> Self {
        Feature::new(record.name, record.flags)
            .with_glyph(record.glyph)
            .with_priority(record.priority)
            .with_digging(record.digging)
    }
}

/// Terrain catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainCatalog {
    pub terrain: Vec<TerrainRecord>,
}

/// Loader for the terrain table from RON files.
///
/// Ids follow the order of the entries in the file.
pub struct FeatureLoader;

impl FeatureLoader {
    /// Load the terrain table from a RON file.
    pub fn load(path: &Path) -> LoadResult<FeatureTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load terrain from {}: {}", path.display(), e))
    }

    /// The terrain table shipped in `data/terrain.ron`.
    pub fn builtin() -> LoadResult<FeatureTable> {
        Self::parse(BUILTIN_TERRAIN)
    }

    pub fn parse(content: &str) -> LoadResult<FeatureTable> {
        let catalog: TerrainCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse terrain RON: {}", e))?;

        if catalog.terrain.is_empty() {
            anyhow::bail!("terrain table is empty");
        }
        if catalog.terrain.len() > usize::from(u16::MAX) {
            anyhow::bail!("terrain table has {} entries", catalog.terrain.len());
        }

        let mut seen = HashSet::new();
        for record in &catalog.terrain {
            if !seen.insert(record.name.as_str()) {
                anyhow::bail!("duplicate terrain '{}'", record.name);
            }
        }

        let table = FeatureTable::new(catalog.terrain.into_iter().map(Feature::from));
        tracing::debug!(terrains = table.len(), "loaded terrain table");
        Ok(table)
    }
}
