use std::collections::BTreeMap;

use crate::state::{MovementGroup, Position};

/// Movement cost returned for tiles a movement group cannot enter.
pub const IMPASSABLE: u32 = 99;

/// Static map oracle exposing board bounds and terrain movement costs.
///
/// Pathfinding stays in the host; forced movement only needs per-tile cost.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Cost for `group` to enter `position`; [`IMPASSABLE`] when it cannot.
    fn movement_cost(&self, position: Position, group: MovementGroup) -> u32;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Canonical terrain classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Plains,
    Forest,
    Mountain,
    Water,
    Wall,
    /// Designer-defined terrain with an explicit flat cost for every group.
    Custom(u32),
}

impl TerrainKind {
    pub fn movement_cost(self, group: MovementGroup) -> u32 {
        match (self, group) {
            (Self::Wall, _) => IMPASSABLE,
            (_, MovementGroup::Flying) => 1,
            (Self::Plains, _) => 1,
            (Self::Forest, MovementGroup::Mounted) => 3,
            (Self::Forest, _) => 2,
            (Self::Mountain, MovementGroup::Foot) => 3,
            (Self::Mountain, _) => IMPASSABLE,
            (Self::Water, _) => IMPASSABLE,
            (Self::Custom(cost), _) => cost,
        }
    }
}

/// In-memory grid map; tiles not listed are plains.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    #[cfg_attr(feature = "serde", serde(default))]
    terrain: BTreeMap<Position, TerrainKind>,
}

impl GridMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            terrain: BTreeMap::new(),
        }
    }

    pub fn with_terrain(mut self, position: Position, terrain: TerrainKind) -> Self {
        self.terrain.insert(position, terrain);
        self
    }

    pub fn terrain(&self, position: Position) -> TerrainKind {
        self.terrain.get(&position).copied().unwrap_or_default()
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn movement_cost(&self, position: Position, group: MovementGroup) -> u32 {
        if !self.dimensions.contains(position) {
            return IMPASSABLE;
        }
        self.terrain(position).movement_cost(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_impassable() {
        let map = GridMap::new(3, 3);
        assert_eq!(
            map.movement_cost(Position::new(3, 0), MovementGroup::Foot),
            IMPASSABLE
        );
        assert_eq!(map.movement_cost(Position::new(2, 2), MovementGroup::Foot), 1);
    }

    #[test]
    fn fliers_ignore_terrain_but_not_walls() {
        let map = GridMap::new(3, 3)
            .with_terrain(Position::new(1, 1), TerrainKind::Water)
            .with_terrain(Position::new(2, 2), TerrainKind::Wall);
        assert_eq!(map.movement_cost(Position::new(1, 1), MovementGroup::Flying), 1);
        assert_eq!(
            map.movement_cost(Position::new(1, 1), MovementGroup::Armored),
            IMPASSABLE
        );
        assert_eq!(
            map.movement_cost(Position::new(2, 2), MovementGroup::Flying),
            IMPASSABLE
        );
    }
}
