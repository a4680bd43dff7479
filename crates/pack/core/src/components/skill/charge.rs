//! Consumable charge counters.
//!
//! `charge` and `total_charge` live in the skill's data bag. They change only
//! through [`Action::TriggerCharge`] and [`Action::RestoreCharge`], which the
//! action log routes back here; every write is clamped to
//! `0 ..= total_charge`.

use crate::action::{Action, DataWrite, ObjRef};
use crate::lifecycle::{HookContext, Hooks, QueryContext};
use crate::state::{DataBag, SkillInstance, UnitId, WorldState};

pub const CHARGE: &str = "charge";
pub const TOTAL_CHARGE: &str = "total_charge";
pub const ACTIVE: &str = "active";

/// What a trigger does to the counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChargeVariant {
    /// Decrement by `cost`.
    #[default]
    Drain,
    /// Decrement by `cost` here and on every ally holding the same skill.
    DrainAll,
    /// Flip `active` for the rest of the combat.
    OncePerCombat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Charge {
    pub total: u32,
    pub cost: u32,
    pub variant: ChargeVariant,
    pub refill_per_turn: u32,
    /// Spend a charge at the end of every combat the skill took part in.
    /// Proc skills turn this off and spend from their own hook.
    pub trigger_at_end_combat: bool,
}

impl Default for Charge {
    fn default() -> Self {
        Self {
            total: 3,
            cost: 1,
            variant: ChargeVariant::Drain,
            refill_per_turn: 0,
            trigger_at_end_combat: true,
        }
    }
}

fn counters(data: &DataBag, total: u32) -> (i64, i64) {
    let total_charge = data.int_or(TOTAL_CHARGE, i64::from(total)).max(0);
    let charge = data.int_or(CHARGE, 0).clamp(0, total_charge);
    (charge, total_charge)
}

impl Charge {
    pub fn hooks(&self) -> Hooks {
        let mut hooks = Hooks::INIT | Hooks::CONDITION;
        match self.variant {
            ChargeVariant::Drain | ChargeVariant::DrainAll => {
                if self.trigger_at_end_combat {
                    hooks |= Hooks::END_COMBAT;
                }
                if self.refill_per_turn > 0 {
                    hooks |= Hooks::ON_UPKEEP;
                }
            }
            ChargeVariant::OncePerCombat => hooks |= Hooks::CLEANUP_COMBAT,
        }
        hooks
    }

    pub fn init(&self, data: &mut DataBag) {
        data.set_default(CHARGE, self.total);
        data.set_default(TOTAL_CHARGE, self.total);
        if self.variant == ChargeVariant::OncePerCombat {
            data.set_default(ACTIVE, false);
        }
    }

    pub fn condition(&self, query: &QueryContext<'_>) -> bool {
        let Some(skill) = query.source_skill() else {
            return false;
        };
        match self.variant {
            ChargeVariant::OncePerCombat => !skill.data.flag(ACTIVE),
            ChargeVariant::Drain | ChargeVariant::DrainAll => {
                let (charge, _) = counters(&skill.data, self.total);
                charge >= i64::from(self.cost)
            }
        }
    }

    pub fn end_combat(&self, ctx: &mut HookContext<'_>) {
        if let Some(skill) = ctx.source_skill() {
            ctx.push(Action::TriggerCharge {
                unit: ctx.owner,
                skill: skill.nid.clone(),
            });
        }
    }

    pub fn cleanup_combat(&self, ctx: &mut HookContext<'_>) {
        if let Some(skill) = ctx.source_skill().filter(|skill| skill.data.flag(ACTIVE)) {
            ctx.push(Action::SetObjData {
                target: ObjRef::Skill(skill.uid),
                key: ACTIVE.to_owned(),
                value: false.into(),
            });
        }
    }

    pub fn on_upkeep(&self, ctx: &mut HookContext<'_>) {
        let Some(skill) = ctx.source_skill() else {
            return;
        };
        let (charge, total_charge) = counters(&skill.data, self.total);
        if charge < total_charge {
            ctx.push(Action::RestoreCharge {
                unit: ctx.owner,
                skill: skill.nid.clone(),
                amount: self.refill_per_turn,
            });
        }
    }

    fn drained(&self, skill: &SkillInstance) -> DataWrite {
        let (charge, _) = counters(&skill.data, self.total);
        let next = (charge - i64::from(self.cost)).max(0);
        DataWrite::new(ObjRef::Skill(skill.uid), CHARGE, next)
    }

    /// Data writes for one `TriggerCharge` on `skill`, held by `unit`.
    pub fn trigger_writes(
        &self,
        world: &WorldState,
        unit: UnitId,
        skill: &SkillInstance,
    ) -> Vec<DataWrite> {
        match self.variant {
            ChargeVariant::Drain => vec![self.drained(skill)],
            ChargeVariant::DrainAll => {
                let mut writes = vec![self.drained(skill)];
                for ally in world.allies_holding(unit, &skill.nid) {
                    let mirrored = world
                        .unit(ally)
                        .and_then(|state| state.skill_by_nid(&skill.nid));
                    if let Some(mirrored) = mirrored {
                        writes.push(self.drained(mirrored));
                    }
                }
                writes
            }
            ChargeVariant::OncePerCombat => {
                vec![DataWrite::new(ObjRef::Skill(skill.uid), ACTIVE, true)]
            }
        }
    }

    /// Data writes for one `RestoreCharge` of `amount` on `skill`.
    pub fn restore_writes(&self, skill: &SkillInstance, amount: u32) -> Vec<DataWrite> {
        let (charge, total_charge) = counters(&skill.data, self.total);
        let next = (charge + i64::from(amount)).min(total_charge);
        vec![DataWrite::new(ObjRef::Skill(skill.uid), CHARGE, next)]
    }
}

/// Current `(charge, total_charge)` of a skill, if it carries a charge component.
pub fn charge_state(skill: &SkillInstance) -> Option<(i64, i64)> {
    let charge = crate::components::charge_of(&skill.components)?;
    Some(counters(&skill.data, charge.total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_keeps_saved_counters() {
        let charge = Charge {
            total: 4,
            ..Charge::default()
        };
        let mut data = DataBag::new().with(CHARGE, 1);
        charge.init(&mut data);

        assert_eq!(data.int(CHARGE), Some(1));
        assert_eq!(data.int(TOTAL_CHARGE), Some(4));
    }

    #[test]
    fn counters_clamp_corrupt_values() {
        let data = DataBag::new().with(CHARGE, 9).with(TOTAL_CHARGE, 3);
        assert_eq!(counters(&data, 3), (3, 3));

        let data = DataBag::new().with(CHARGE, -2);
        assert_eq!(counters(&data, 3), (0, 3));
    }

    #[test]
    fn once_per_combat_declares_cleanup() {
        let charge = Charge {
            variant: ChargeVariant::OncePerCombat,
            ..Charge::default()
        };
        assert!(charge.hooks().contains(Hooks::CLEANUP_COMBAT));
        assert!(!charge.hooks().contains(Hooks::END_COMBAT));
    }
}
