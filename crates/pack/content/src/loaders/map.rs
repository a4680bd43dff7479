//! Map data loader.
//!
//! Loads terrain only; unit placement lives in scenario files.

use std::path::Path;

use pack_core::{GridMap, Position, TerrainKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Map data structure for RON files (terrain only).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a grid map from a RON file.
    ///
    /// Tiles not listed are plains.
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GridMap> {
        let data: MapDataRon = parse_ron(content, "map")?;

        let (width, height) = data.dimensions;
        let mut map = GridMap::new(width, height);
        for (x, y, terrain) in data.tiles {
            let position = Position::new(x, y);
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                anyhow::bail!("tile {} lies outside the {}x{} map", position, width, height);
            }
            map = map.with_terrain(position, terrain);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pack_core::{IMPASSABLE, MapOracle, MovementGroup};

    #[test]
    fn unlisted_tiles_are_plains() {
        let map = MapLoader::parse("(dimensions: (4, 3), tiles: [(1, 1, Wall), (2, 1, Forest)])")
            .unwrap();
        assert_eq!(map.dimensions().width, 4);
        assert_eq!(map.terrain(Position::new(0, 0)), TerrainKind::Plains);
        assert_eq!(map.terrain(Position::new(2, 1)), TerrainKind::Forest);
        assert_eq!(
            map.movement_cost(Position::new(1, 1), MovementGroup::Foot),
            IMPASSABLE
        );
    }

    #[test]
    fn rejects_tiles_off_the_board() {
        assert!(MapLoader::parse("(dimensions: (2, 2), tiles: [(2, 0, Wall)])").is_err());
    }
}
