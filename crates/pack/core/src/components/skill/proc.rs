//! Randomized triggers that grant a transient skill for one strike.

use tracing::debug;

use crate::action::Action;
use crate::lifecycle::{HookContext, Hooks};
use crate::playback::PlaybackKind;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Proc {
    /// Percent chance per strike, capped by the pack configuration.
    pub rate: u32,
    /// Transient skill granted for the strike.
    pub skill: String,
    /// Weapon family the owner must strike with; any weapon when unset.
    pub weapon: Option<String>,
}

impl Proc {
    pub const HOOKS: Hooks = Hooks::START_SUB_COMBAT.union(Hooks::END_SUB_COMBAT);

    fn weapon_matches(&self, ctx: &HookContext<'_>) -> bool {
        match &self.weapon {
            None => true,
            Some(weapon) => ctx
                .combat_item()
                .and_then(|item| item.weapon_type())
                .is_some_and(|kind| kind.eq_ignore_ascii_case(weapon)),
        }
    }

    pub fn start_sub_combat(&self, ctx: &mut HookContext<'_>) {
        if !ctx.is_striker() || !self.weapon_matches(ctx) {
            return;
        }
        let rng = match ctx.env.rng() {
            Ok(rng) => rng,
            Err(error) => {
                debug!(target: "pack::lifecycle", %error, "proc skipped");
                return;
            }
        };

        let rate = self.rate.min(ctx.config.proc_rate_cap);
        let roll = ctx.stream.roll_d100(rng, ctx.owner);
        if roll > rate {
            return;
        }
        if !ctx.env.skill_exists(&self.skill) {
            debug!(
                target: "pack::lifecycle",
                skill = %self.skill,
                "proc skill is not in the catalog"
            );
            return;
        }

        debug!(
            target: "pack::lifecycle",
            owner = %ctx.owner,
            skill = %self.skill,
            roll,
            rate,
            "proc activated"
        );
        ctx.push(Action::AddSkill {
            unit: ctx.owner,
            nid: self.skill.clone(),
            initiator: Some(ctx.owner),
        });
        ctx.record(PlaybackKind::ProcActivated {
            skill: self.skill.clone(),
        });
        ctx.scratch.did_action = true;
    }

    pub fn end_sub_combat(&self, ctx: &mut HookContext<'_>) {
        if !ctx.scratch.did_action {
            return;
        }
        if let Some(skill) = ctx.source_skill() {
            ctx.push(Action::TriggerCharge {
                unit: ctx.owner,
                skill: skill.nid.clone(),
            });
        }
        ctx.push(Action::RemoveSkill {
            unit: ctx.owner,
            nid: self.skill.clone(),
            count: Some(1),
        });
        ctx.scratch.did_action = false;
    }
}
