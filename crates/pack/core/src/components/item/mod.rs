//! Components designers attach to items.
mod combat;
mod eval;
mod forced;
mod status;

pub use combat::{EventAfterCombat, HealOnHit, StackCostMulti, steal_plus};
pub use eval::{EvalDamageBonus, EvalTargetRestrict};
pub use forced::{FORCED_HOOKS, PivotOptions, ShoveOptions, draw, pivot, shove};
pub use status::{StatusAfterCombat, StatusAfterHit, StatusOnHit, restore_after_combat};
