//! Items that grant or strip statuses.

use std::collections::BTreeSet;

use tracing::debug;

use crate::action::Action;
use crate::lifecycle::{HookContext, Hooks};
use crate::playback::PlaybackKind;
use crate::state::UnitId;

/// Grants `skill` to `target` on behalf of the context owner.
fn grant(ctx: &mut HookContext<'_>, target: UnitId, skill: &str) {
    if !ctx.env.skill_exists(skill) {
        debug!(
            target: "pack::lifecycle",
            skill,
            "status skill is not in the catalog, effect skipped"
        );
        return;
    }
    ctx.push(Action::AddSkill {
        unit: target,
        nid: skill.to_owned(),
        initiator: Some(ctx.owner),
    });
    ctx.playback.record(
        PlaybackKind::StatusHit {
            skill: skill.to_owned(),
        },
        ctx.owner,
        target,
    );
}

/// Grants a status to the opponent once the combat ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusAfterCombat {
    pub skill: String,
}

impl StatusAfterCombat {
    pub const HOOKS: Hooks = Hooks::END_COMBAT;

    pub fn end_combat(&self, ctx: &mut HookContext<'_>) {
        if let Some(target) = ctx.opponent {
            grant(ctx, target, &self.skill);
        }
    }
}

/// Grants a status after combat, only to units this item actually hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusAfterHit {
    pub skill: String,
}

impl StatusAfterHit {
    pub const HOOKS: Hooks = Hooks::ON_HIT
        .union(Hooks::ON_CRIT)
        .union(Hooks::END_COMBAT);

    pub fn on_hit(&self, ctx: &mut HookContext<'_>) {
        if let Some(target) = ctx.opponent {
            ctx.scratch.did_hit.insert(target);
        }
    }

    pub fn end_combat(&self, ctx: &mut HookContext<'_>) {
        let hit: Vec<UnitId> = ctx.scratch.did_hit.iter().copied().collect();
        for target in hit {
            grant(ctx, target, &self.skill);
        }
    }
}

/// Grants a status on every hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusOnHit {
    pub skill: String,
}

impl StatusOnHit {
    pub const HOOKS: Hooks = Hooks::ON_HIT;

    pub fn on_hit(&self, ctx: &mut HookContext<'_>) {
        if let Some(target) = ctx.opponent {
            grant(ctx, target, &self.skill);
        }
    }
}

/// Removes every negative status from the opponent after combat.
pub fn restore_after_combat(ctx: &mut HookContext<'_>) {
    let Some(target) = ctx.opponent_state() else {
        return;
    };
    let catalog = match ctx.env.catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            debug!(target: "pack::lifecycle", %error, "restore skipped");
            return;
        }
    };

    let negative: BTreeSet<&str> = target
        .skill_nids()
        .filter(|nid| catalog.skill(nid).is_some_and(|prefab| prefab.negative))
        .collect();
    for nid in negative {
        ctx.push(Action::RemoveSkill {
            unit: target.id,
            nid: nid.to_owned(),
            count: None,
        });
        ctx.playback.record(
            PlaybackKind::Restore {
                skill: nid.to_owned(),
            },
            ctx.owner,
            target.id,
        );
    }
}
