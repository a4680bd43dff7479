use crate::env::{evaluate_bool_or, evaluate_int_or};
use crate::lifecycle::{Hooks, QueryContext};

/// Bonus damage from an expression; `0` when it cannot be evaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalDamageBonus {
    pub expr: String,
}

impl EvalDamageBonus {
    pub const HOOKS: Hooks = Hooks::DAMAGE_BONUS;

    pub fn damage_bonus(&self, query: &QueryContext<'_>) -> i64 {
        match query.eval_context() {
            Some(eval) => evaluate_int_or(&query.env, "eval_damage_bonus", &self.expr, &eval, 0),
            None => 0,
        }
    }
}

/// Target filter from an expression; fails open to `true`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalTargetRestrict {
    pub expr: String,
}

impl EvalTargetRestrict {
    pub const HOOKS: Hooks = Hooks::TARGET_RESTRICT;

    pub fn target_restrict(&self, query: &QueryContext<'_>) -> bool {
        match query.eval_context() {
            Some(eval) => {
                evaluate_bool_or(&query.env, "eval_target_restrict", &self.expr, &eval, true)
            }
            None => true,
        }
    }
}
