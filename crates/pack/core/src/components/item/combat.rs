//! On-hit effects on the user and the opponent's inventory.

use tracing::debug;

use crate::action::Action;
use crate::lifecycle::{HookContext, Hooks};
use crate::playback::PlaybackKind;

/// Heals the user by a flat amount on every hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealOnHit {
    pub amount: i32,
}

impl Default for HealOnHit {
    fn default() -> Self {
        Self { amount: 10 }
    }
}

impl HealOnHit {
    pub const HOOKS: Hooks = Hooks::ON_HIT;

    pub fn on_hit(&self, ctx: &mut HookContext<'_>) {
        if self.amount <= 0 {
            return;
        }
        ctx.push(Action::ChangeHp {
            unit: ctx.owner,
            delta: self.amount,
        });
        ctx.record(PlaybackKind::HealHit {
            amount: self.amount,
        });
    }
}

/// Takes the opponent's last unlocked item that is not their weapon.
pub fn steal_plus(ctx: &mut HookContext<'_>) {
    let Some(target) = ctx.opponent_state() else {
        return;
    };
    let loot = target
        .items
        .iter()
        .rev()
        .find(|item| !item.is_locked() && Some(item.uid) != ctx.opponent_item);
    let Some(loot) = loot else {
        debug!(target: "pack::lifecycle", victim = %target.id, "nothing to steal");
        return;
    };
    ctx.push(Action::TransferItem {
        from: target.id,
        to: ctx.owner,
        item: loot.uid,
    });
    ctx.record(PlaybackKind::StealHit { item: loot.uid });
}

/// Requests a scripted event after combat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventAfterCombat {
    pub event: String,
}

impl EventAfterCombat {
    pub const HOOKS: Hooks = Hooks::END_COMBAT;

    pub fn end_combat(&self, ctx: &mut HookContext<'_>) {
        if !ctx.env.event_exists(&self.event) {
            debug!(target: "pack::lifecycle", event = %self.event, "event is not in the catalog");
            return;
        }
        ctx.push(Action::TriggerEvent {
            nid: self.event.clone(),
            unit: ctx.owner,
            position: ctx.target_position,
        });
    }
}

/// Item usable only while the user holds `amount` stacks of `skill`,
/// which the use consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackCostMulti {
    pub skill: String,
    pub amount: u32,
}

impl Default for StackCostMulti {
    fn default() -> Self {
        Self {
            skill: String::new(),
            amount: 2,
        }
    }
}

impl StackCostMulti {
    pub const HOOKS: Hooks = Hooks::AVAILABLE
        .union(Hooks::START_COMBAT)
        .union(Hooks::REVERSE_USE);

    pub fn available(&self, query: &crate::lifecycle::QueryContext<'_>) -> bool {
        query
            .unit_state()
            .is_some_and(|unit| unit.stacks(&self.skill) >= self.amount as usize)
    }

    pub fn start_combat(&self, ctx: &mut HookContext<'_>) {
        ctx.push(Action::RemoveSkill {
            unit: ctx.owner,
            nid: self.skill.clone(),
            count: Some(self.amount),
        });
    }

    pub fn reverse_use(&self, ctx: &mut HookContext<'_>) {
        if !ctx.env.skill_exists(&self.skill) {
            debug!(target: "pack::lifecycle", skill = %self.skill, "stack skill is not in the catalog");
            return;
        }
        for _ in 0..self.amount {
            ctx.push(Action::AddSkill {
                unit: ctx.owner,
                nid: self.skill.clone(),
                initiator: None,
            });
        }
    }
}
