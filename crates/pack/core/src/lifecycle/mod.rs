//! The combat callback lifecycle.
//!
//! Components declare [`Hooks`]; [`CombatEngine`] calls them in the fixed
//! phase order, hands each call a [`HookContext`] with its combat-scoped
//! [`Scratch`], and commits the actions they append. Pure predicates get a
//! [`QueryContext`] and are exposed as free functions for the host.
mod attachment;
mod context;
mod engine;
mod error;
mod hooks;
mod queries;
mod scratch;

pub use attachment::{Attachment, gather_all, gather_combat, gather_item};
pub use context::{HookContext, QueryContext};
pub use engine::{CombatEngine, CombatReport, CombatSpec, Strike, StrikeOutcome};
pub use error::CombatError;
pub use hooks::{CombatRole, HookPoint, Hooks, TurnPhase};
pub use queries::{
    item_available, item_damage_bonus, item_splash, item_splash_positions, item_target_restrict,
    item_valid_targets, skill_active,
};
pub use scratch::{AttachmentKey, AttachmentSource, Scratch, ScratchArena, SessionId};
