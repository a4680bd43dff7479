//! Shove, draw, and pivot.

use tracing::debug;

use crate::action::Action;
use crate::components::ignores_forced_movement;
use crate::lifecycle::{HookContext, Hooks};
use crate::movement::{ForcedMove, ForcedPolicy, Motion, resolve_forced_move};
use crate::playback::PlaybackKind;
use crate::state::{Position, UnitId};

/// Options shared by shove and draw.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShoveOptions {
    pub magnitude: i32,
    pub policy: ForcedPolicy,
    /// Event requested when a flexible move is stopped early.
    pub collision_event: Option<String>,
}

impl Default for ShoveOptions {
    fn default() -> Self {
        Self {
            magnitude: 1,
            policy: ForcedPolicy::AllOrNothing,
            collision_event: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PivotOptions {
    pub magnitude: i32,
    pub policy: ForcedPolicy,
}

impl Default for PivotOptions {
    fn default() -> Self {
        Self {
            magnitude: 2,
            policy: ForcedPolicy::AllOrNothing,
        }
    }
}

pub const FORCED_HOOKS: Hooks = Hooks::ON_HIT;

/// Moves `mover` relative to `anchor_unit`'s tile and appends the result.
fn displace(
    ctx: &mut HookContext<'_>,
    mover: UnitId,
    anchor_unit: UnitId,
    motion: Motion,
    magnitude: i32,
    policy: ForcedPolicy,
    collision_event: Option<&str>,
) {
    let Some(mover_state) = ctx.world.unit(mover) else {
        return;
    };
    if ignores_forced_movement(mover_state) {
        debug!(target: "pack::movement", %mover, "unit ignores forced movement");
        return;
    }
    let Some(anchor) = ctx.world.unit(anchor_unit).and_then(|unit| unit.position) else {
        return;
    };
    let map = match ctx.env.map() {
        Ok(map) => map,
        Err(error) => {
            debug!(target: "pack::movement", %error, "forced move skipped");
            return;
        }
    };

    let request = ForcedMove {
        mover,
        anchor,
        motion,
        magnitude,
        policy,
    };
    let Some(outcome) = resolve_forced_move(ctx.world, map, request) else {
        return;
    };

    if outcome.moved() {
        ctx.push(Action::ForcedMove {
            unit: mover,
            to: outcome.destination,
        });
        ctx.playback.record(
            PlaybackKind::Shove {
                from: outcome.start,
                to: outcome.destination,
            },
            ctx.owner,
            mover,
        );
    }
    if outcome.collided {
        collide(ctx, mover, outcome.destination, collision_event);
    }
}

fn collide(ctx: &mut HookContext<'_>, mover: UnitId, at: Position, event: Option<&str>) {
    ctx.playback
        .record(PlaybackKind::Collision { at }, ctx.owner, mover);
    let Some(event) = event else {
        return;
    };
    if !ctx.env.event_exists(event) {
        debug!(target: "pack::movement", event, "collision event is not in the catalog");
        return;
    }
    ctx.push(Action::TriggerEvent {
        nid: event.to_owned(),
        unit: mover,
        position: Some(at),
    });
}

/// Pushes the opponent away from the user.
pub fn shove(options: &ShoveOptions, ctx: &mut HookContext<'_>) {
    if let Some(target) = ctx.opponent {
        let owner = ctx.owner;
        displace(
            ctx,
            target,
            owner,
            Motion::Away,
            options.magnitude,
            options.policy,
            options.collision_event.as_deref(),
        );
    }
}

/// Pulls the opponent toward the user.
pub fn draw(options: &ShoveOptions, ctx: &mut HookContext<'_>) {
    if let Some(target) = ctx.opponent {
        let owner = ctx.owner;
        displace(
            ctx,
            target,
            owner,
            Motion::Toward,
            options.magnitude,
            options.policy,
            options.collision_event.as_deref(),
        );
    }
}

/// Moves the user past the opponent.
pub fn pivot(options: &PivotOptions, ctx: &mut HookContext<'_>) {
    if let Some(target) = ctx.opponent {
        let owner = ctx.owner;
        displace(
            ctx,
            owner,
            target,
            Motion::Through,
            options.magnitude,
            options.policy,
            None,
        );
    }
}
