//! Item and skill components for a grid tactics engine.
//!
//! `pack-core` supplies the building blocks designers attach to items and
//! skills, and the lifecycle dispatcher that drives them through a combat.
//! The host engine resolves hit and damage rolls; this crate turns those
//! results into hook calls, commits the resulting [`action::Action`]s through
//! the reversible [`action::ActionLog`], and keeps per-combat scratch in an
//! arena that is discarded when the combat closes.
pub mod action;
pub mod aoe;
pub mod components;
pub mod config;
pub mod env;
pub mod error;
pub mod lifecycle;
pub mod movement;
pub mod playback;
pub mod state;

pub use action::{Action, ActionError, ActionLog, Checkpoint, DataWrite, ObjRef, UndoRecord};
pub use aoe::{Relation, Splash, SplashAoe, SplashShape};
pub use components::Component;
pub use config::PackConfig;
pub use env::{
    CatalogOracle, CombatStream, Env, EvalContext, EvalError, EvalValue, Evaluator, GridMap,
    IMPASSABLE, LiteralEvaluator, MapOracle, MemoryCatalog, OracleError, PcgRng, RngOracle,
    SkillPrefab, TerrainKind,
};
pub use error::{ErrorContext, ErrorSeverity, PackError};
pub use lifecycle::{
    CombatEngine, CombatError, CombatReport, CombatRole, CombatSpec, HookContext, HookPoint,
    Hooks, QueryContext, Strike, StrikeOutcome, TurnPhase,
};
pub use movement::{ForcedMove, ForcedMoveOutcome, ForcedPolicy, Motion, resolve_forced_move};
pub use playback::{Playback, PlaybackKind, PlaybackLog};
pub use state::{
    DataBag, DataValue, ItemInstance, ItemUid, MovementGroup, Position, SkillInstance, SkillUid,
    Team, UnitId, UnitState, WorldState,
};
