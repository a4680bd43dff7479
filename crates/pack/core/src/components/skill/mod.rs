//! Components designers attach to skills.
mod charge;
mod eval;
mod passive;
mod proc;
mod uses;

pub use charge::{ACTIVE, CHARGE, Charge, ChargeVariant, TOTAL_CHARGE, charge_state};
pub use eval::EvalCondition;
pub use passive::{Regenerate, StatusWhenDamaged, survive_lethal};
pub use proc::Proc;
pub use uses::{CostUses, LOSE_USES_ON_MISS, USES};
