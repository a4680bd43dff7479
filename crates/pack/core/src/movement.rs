//! Forced displacement: shove, pivot, draw.
//!
//! The direction is the dominant 8-direction unit step between the anchor
//! and the mover. A step is legal when the tile is on the board, holds no
//! other unit, and the mover's movement group can enter it.

use tracing::debug;

use crate::env::{IMPASSABLE, MapOracle};
use crate::state::{Position, UnitId, WorldState};

/// How an obstructed path is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ForcedPolicy {
    /// The whole path must be legal, otherwise nothing moves.
    #[default]
    AllOrNothing,
    /// Walk tile by tile and stop before the first illegal step.
    Flexible,
}

/// Direction of the displacement relative to the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Motion {
    #[default]
    Away,
    Toward,
    /// Toward the anchor and past it; the anchor's own tile may be crossed.
    Through,
}

/// Where a forced move ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcedMoveOutcome {
    pub start: Position,
    pub destination: Position,
    /// Steps actually taken.
    pub steps: u32,
    /// Flexible moves only: the path was obstructed before its full length.
    pub collided: bool,
}

impl ForcedMoveOutcome {
    pub fn moved(&self) -> bool {
        self.destination != self.start
    }
}

/// Request for [`resolve_forced_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcedMove {
    pub mover: UnitId,
    pub anchor: Position,
    pub motion: Motion,
    /// Tiles to travel; negative values reverse the direction.
    pub magnitude: i32,
    pub policy: ForcedPolicy,
}

/// Unit step for `motion`, or `None` when mover and anchor share a tile.
fn direction(motion: Motion, mover: Position, anchor: Position, magnitude: i32) -> Option<(i32, i32)> {
    let (dx, dy) = match motion {
        Motion::Away => anchor.step_toward(mover),
        Motion::Toward | Motion::Through => mover.step_toward(anchor),
    };
    if (dx, dy) == (0, 0) {
        return None;
    }
    Some(if magnitude < 0 { (-dx, -dy) } else { (dx, dy) })
}

/// Computes the destination of a forced move without changing the world.
///
/// Returns `None` when the mover is unknown or off the board.
pub fn resolve_forced_move(
    world: &WorldState,
    map: &dyn MapOracle,
    request: ForcedMove,
) -> Option<ForcedMoveOutcome> {
    let mover = world.unit(request.mover)?;
    let start = mover.position?;
    let stationary = ForcedMoveOutcome {
        start,
        destination: start,
        steps: 0,
        collided: false,
    };

    let Some((dx, dy)) = direction(request.motion, start, request.anchor, request.magnitude) else {
        return Some(stationary);
    };
    let wanted = request.magnitude.unsigned_abs();

    let legal = |tile: Position| {
        map.contains(tile)
            && map.movement_cost(tile, mover.movement_group) != IMPASSABLE
            && world.unit_at(tile).is_none_or(|other| other.id == mover.id)
    };
    let crossable = |tile: Position| request.motion == Motion::Through && tile == request.anchor;

    let mut current = start;
    let mut last_legal = start;
    let mut steps = 0;
    for _ in 0..wanted {
        let next = current.offset(dx, dy);
        if legal(next) {
            last_legal = next;
        } else if !(crossable(next) && map.contains(next)) {
            break;
        }
        current = next;
        steps += 1;
    }

    // The path ends on a crossed tile, so it never reached a legal landing.
    let landed = last_legal == current;
    let complete = steps == wanted && landed;

    let outcome = match request.policy {
        ForcedPolicy::AllOrNothing if complete => ForcedMoveOutcome {
            start,
            destination: current,
            steps,
            collided: false,
        },
        ForcedPolicy::AllOrNothing => stationary,
        ForcedPolicy::Flexible => ForcedMoveOutcome {
            start,
            destination: last_legal,
            steps: last_legal.chebyshev(start),
            collided: !complete,
        },
    };

    debug!(
        target: "pack::movement",
        mover = %request.mover,
        policy = %request.policy,
        motion = %request.motion,
        magnitude = request.magnitude,
        from = %start,
        to = %outcome.destination,
        collided = outcome.collided,
        "forced move resolved"
    );
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, TerrainKind};
    use crate::state::{Team, UnitState};

    fn world(units: &[(u32, (i32, i32))]) -> WorldState {
        let mut world = WorldState::new();
        for (id, (x, y)) in units {
            let unit = UnitState::new(UnitId(*id), "unit", Team::Enemy, Position::new(*x, *y), 10);
            world.insert_unit(unit).unwrap();
        }
        world
    }

    fn shove(magnitude: i32, policy: ForcedPolicy) -> ForcedMove {
        ForcedMove {
            mover: UnitId(2),
            anchor: Position::new(1, 1),
            motion: Motion::Away,
            magnitude,
            policy,
        }
    }

    #[test]
    fn unobstructed_policies_agree() {
        let world = world(&[(1, (1, 1)), (2, (2, 1))]);
        let map = GridMap::new(10, 10);

        let strict = resolve_forced_move(&world, &map, shove(3, ForcedPolicy::AllOrNothing)).unwrap();
        let flexible = resolve_forced_move(&world, &map, shove(3, ForcedPolicy::Flexible)).unwrap();
        assert_eq!(strict.destination, Position::new(5, 1));
        assert_eq!(strict, flexible);
    }

    #[test]
    fn wall_stops_flexible_and_blocks_strict() {
        let world = world(&[(1, (1, 1)), (2, (2, 1))]);
        let map = GridMap::new(10, 10).with_terrain(Position::new(4, 1), TerrainKind::Wall);

        let strict = resolve_forced_move(&world, &map, shove(3, ForcedPolicy::AllOrNothing)).unwrap();
        assert!(!strict.moved());

        let flexible = resolve_forced_move(&world, &map, shove(3, ForcedPolicy::Flexible)).unwrap();
        assert_eq!(flexible.destination, Position::new(3, 1));
        assert_eq!(flexible.steps, 1);
        assert!(flexible.collided);
    }

    #[test]
    fn negative_magnitude_pulls() {
        let world = world(&[(1, (1, 1)), (2, (4, 1))]);
        let map = GridMap::new(10, 10);

        let outcome = resolve_forced_move(&world, &map, shove(-2, ForcedPolicy::AllOrNothing)).unwrap();
        assert_eq!(outcome.destination, Position::new(2, 1));
    }

    #[test]
    fn through_crosses_the_anchor() {
        let world = world(&[(1, (1, 1)), (2, (2, 1))]);
        let map = GridMap::new(10, 10);
        let request = ForcedMove {
            mover: UnitId(1),
            anchor: Position::new(2, 1),
            motion: Motion::Through,
            magnitude: 2,
            policy: ForcedPolicy::AllOrNothing,
        };

        let outcome = resolve_forced_move(&world, &map, request).unwrap();
        assert_eq!(outcome.destination, Position::new(3, 1));
        assert_eq!(outcome.steps, 2);
    }
}
