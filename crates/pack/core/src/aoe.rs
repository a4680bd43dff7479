//! Splash target selection.
//!
//! `splash` drives effect application and `splash_positions` drives
//! highlighting. Both go through [`SplashAoe::select_tiles`] so they cannot
//! disagree: every tile `splash` affects is highlighted, or is the centre.

use std::collections::BTreeSet;

use crate::env::{MapDimensions, MapOracle};
use crate::state::{Position, UnitState, WorldState};

/// Tile footprint around the centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplashShape {
    /// Every tile within Chebyshev distance `radius`.
    Square { radius: u32 },
    /// Every tile within Manhattan distance `radius`.
    Blast { radius: u32 },
}

impl SplashShape {
    pub const fn radius(self) -> u32 {
        match self {
            Self::Square { radius } | Self::Blast { radius } => radius,
        }
    }

    pub fn covers(self, centre: Position, tile: Position) -> bool {
        match self {
            Self::Square { radius } => centre.chebyshev(tile) <= radius,
            Self::Blast { radius } => centre.manhattan(tile) <= radius,
        }
    }

    /// Tiles of the footprint inside `bounds`, in row-major order.
    /// The scan never leaves the board.
    pub fn tiles(self, centre: Position, bounds: MapDimensions) -> impl Iterator<Item = Position> {
        let r = i64::from(self.radius());
        let clip = |c: i32, len: u32| {
            let low = (i64::from(c) - r).max(0);
            let high = (i64::from(c) + r).min(i64::from(len) - 1);
            (low as i32)..=(high as i32)
        };
        let xs = clip(centre.x, bounds.width);
        let ys = clip(centre.y, bounds.height);
        ys.flat_map(move |y| xs.clone().map(move |x| Position::new(x, y)))
            .filter(move |tile| self.covers(centre, *tile))
    }
}

/// Which occupants a splash may affect, relative to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Relation {
    #[default]
    Enemy,
    Ally,
    Any,
}

impl Relation {
    pub fn allows(self, user: &UnitState, other: &UnitState) -> bool {
        match self {
            Self::Enemy => !user.is_ally_of(other),
            Self::Ally => user.is_ally_of(other),
            Self::Any => true,
        }
    }
}

/// Result of [`SplashAoe::splash`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Splash {
    /// The centre, when an allowed unit stands on it.
    pub primary: Option<Position>,
    /// Other selected tiles holding an allowed unit.
    pub secondary: BTreeSet<Position>,
}

impl Splash {
    /// Every affected tile, primary first.
    pub fn affected(&self) -> impl Iterator<Item = Position> + '_ {
        self.primary.into_iter().chain(self.secondary.iter().copied())
    }
}

/// Area-of-effect options for an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplashAoe {
    pub shape: SplashShape,
    pub relation: Relation,
    /// Allows the user's own tile to be selected.
    pub include_user: bool,
    /// Centres the area on the user instead of the chosen tile.
    pub centered_on_user: bool,
}

impl Default for SplashAoe {
    fn default() -> Self {
        Self::enemy_cleave()
    }
}

impl SplashAoe {
    /// 3x3 block of enemies around the target.
    pub const fn enemy_cleave() -> Self {
        Self {
            shape: SplashShape::Square { radius: 1 },
            relation: Relation::Enemy,
            include_user: false,
            centered_on_user: false,
        }
    }

    /// 5x5 block of enemies around the target.
    pub const fn enemy_big_cleave() -> Self {
        Self {
            shape: SplashShape::Square { radius: 2 },
            relation: Relation::Enemy,
            include_user: false,
            centered_on_user: false,
        }
    }

    pub const fn ally_blast(radius: u32) -> Self {
        Self {
            shape: SplashShape::Blast { radius },
            relation: Relation::Ally,
            include_user: false,
            centered_on_user: false,
        }
    }

    /// Blast around the user that also catches the user.
    pub const fn self_blast(radius: u32) -> Self {
        Self {
            shape: SplashShape::Blast { radius },
            relation: Relation::Any,
            include_user: true,
            centered_on_user: true,
        }
    }

    /// Effective centre for a chosen `position`.
    pub fn centre(&self, user: &UnitState, position: Position) -> Position {
        match (self.centered_on_user, user.position) {
            (true, Some(own)) => own,
            _ => position,
        }
    }

    /// The tile-selection rule shared by [`splash`](Self::splash) and
    /// [`splash_positions`](Self::splash_positions).
    ///
    /// Footprint tiles, minus out-of-bounds tiles, minus the user's tile
    /// unless `include_user`, minus tiles whose occupant the relation rejects.
    pub fn select_tiles(
        &self,
        world: &WorldState,
        map: &dyn MapOracle,
        user: &UnitState,
        centre: Position,
    ) -> BTreeSet<Position> {
        self.shape
            .tiles(centre, map.dimensions())
            .filter(|tile| self.include_user || user.position != Some(*tile))
            .filter(|tile| match world.unit_at(*tile) {
                Some(occupant) if occupant.id == user.id => self.include_user,
                Some(occupant) => self.relation.allows(user, occupant),
                None => true,
            })
            .collect()
    }

    /// Tiles to highlight: the selection minus the centre.
    pub fn splash_positions(
        &self,
        world: &WorldState,
        map: &dyn MapOracle,
        user: &UnitState,
        position: Position,
    ) -> BTreeSet<Position> {
        let centre = self.centre(user, position);
        let mut tiles = self.select_tiles(world, map, user, centre);
        tiles.remove(&centre);
        tiles
    }

    /// Tiles the effect applies to.
    pub fn splash(
        &self,
        world: &WorldState,
        map: &dyn MapOracle,
        user: &UnitState,
        position: Position,
    ) -> Splash {
        let centre = self.centre(user, position);
        let selected = self.select_tiles(world, map, user, centre);
        let occupied = |tile: &Position| world.unit_at(*tile).is_some();

        let primary = selected
            .contains(&centre)
            .then_some(centre)
            .filter(|tile| occupied(tile));
        let secondary = selected
            .iter()
            .filter(|tile| **tile != centre && occupied(tile))
            .copied()
            .collect();
        Splash { primary, secondary }
    }
}
