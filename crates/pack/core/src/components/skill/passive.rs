//! Passive skills reacting to strikes and turn boundaries.

use tracing::debug;

use crate::action::Action;
use crate::components::charge_of;
use crate::lifecycle::{HookContext, Hooks};
use crate::playback::PlaybackKind;

/// Grants `skill` after a combat in which the owner took damage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusWhenDamaged {
    pub skill: String,
}

impl StatusWhenDamaged {
    pub const HOOKS: Hooks = Hooks::AFTER_TAKE_STRIKE.union(Hooks::END_COMBAT);

    pub fn after_take_strike(&self, ctx: &mut HookContext<'_>) {
        let owner = ctx.owner;
        if ctx.actions.iter().any(|action| action.damage_to(owner).is_some()) {
            ctx.scratch.took_damage = true;
        }
    }

    pub fn end_combat(&self, ctx: &mut HookContext<'_>) {
        if !ctx.scratch.took_damage {
            return;
        }
        if !ctx.env.skill_exists(&self.skill) {
            debug!(target: "pack::lifecycle", skill = %self.skill, "status skill is not in the catalog");
            return;
        }
        ctx.push(Action::AddSkill {
            unit: ctx.owner,
            nid: self.skill.clone(),
            initiator: ctx.opponent,
        });
        ctx.record(PlaybackKind::StatusHit {
            skill: self.skill.clone(),
        });
    }
}

/// Leaves the owner at 1 hp instead of dying.
///
/// A charge that does not drain at end of combat is spent here, once per save.
pub fn survive_lethal(ctx: &mut HookContext<'_>) {
    if !ctx.owner_state().is_some_and(|unit| unit.hp == 0) {
        return;
    }
    ctx.push(Action::ChangeHp {
        unit: ctx.owner,
        delta: 1,
    });
    if let Some(skill) = ctx.source_skill() {
        if charge_of(&skill.components).is_some_and(|charge| !charge.trigger_at_end_combat) {
            ctx.push(Action::TriggerCharge {
                unit: ctx.owner,
                skill: skill.nid.clone(),
            });
        }
    }
}

/// Heals a share of max hp at upkeep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Regenerate {
    pub percent: u32,
}

impl Default for Regenerate {
    fn default() -> Self {
        Self { percent: 10 }
    }
}

impl Regenerate {
    pub const HOOKS: Hooks = Hooks::ON_UPKEEP;

    pub fn on_upkeep(&self, ctx: &mut HookContext<'_>) {
        let Some(unit) = ctx.owner_state() else {
            return;
        };
        let missing = unit.max_hp - unit.hp;
        if missing <= 0 || !unit.is_alive() {
            return;
        }
        let share = (i64::from(unit.max_hp) * i64::from(self.percent) / 100).max(1);
        let amount = (share.min(i64::from(missing))) as i32;
        ctx.push(Action::ChangeHp {
            unit: ctx.owner,
            delta: amount,
        });
        ctx.record(PlaybackKind::HealHit { amount });
    }
}
