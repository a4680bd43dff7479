use crate::env::evaluate_bool_or;
use crate::lifecycle::{Hooks, QueryContext};

/// Skill condition written in the host's expression language.
///
/// Evaluation failures are logged and the condition does not hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalCondition {
    pub expr: String,
}

impl EvalCondition {
    pub const HOOKS: Hooks = Hooks::CONDITION;

    pub fn condition(&self, query: &QueryContext<'_>) -> bool {
        match query.eval_context() {
            Some(eval) => evaluate_bool_or(&query.env, "eval_condition", &self.expr, &eval, false),
            None => false,
        }
    }
}
