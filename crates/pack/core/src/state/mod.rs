//! Board state the component pack reads.
//!
//! The host engine owns combatants, inventories and skills; this module
//! models the slice of that state components are allowed to see. Mutation
//! happens exclusively through [`crate::action::ActionLog`].
mod common;
mod data;
mod error;
mod unit;
mod world;

pub use common::{ItemUid, Position, SkillUid, Team, UnitId};
pub use data::{DataBag, DataValue};
pub use error::StateError;
pub use unit::{
    ComponentSet, ItemInstance, MovementGroup, SkillInstance, UnitState, WeaponRange,
};
pub use world::{EventRequest, WorldState};
