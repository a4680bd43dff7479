//! Reversible game-state mutations.
//!
//! Components never touch [`WorldState`](crate::state::WorldState) directly.
//! They append [`Action`] intents to the hook's `actions` buffer; the
//! lifecycle dispatcher commits them through [`ActionLog`], which records
//! enough to undo every change so the host's turnwheel stays consistent.
mod apply;
mod error;
mod log;
#[cfg(feature = "serde")]
mod root;

pub use apply::{DataWrite, UndoRecord};
pub use error::ActionError;
pub use log::{ActionLog, Checkpoint, LogEntry};
#[cfg(feature = "serde")]
pub use root::compute_actions_root;

use crate::state::{DataValue, ItemUid, Position, SkillUid, UnitId};

/// Data bag owner addressed by [`Action::SetObjData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjRef {
    Item(ItemUid),
    Skill(SkillUid),
}

/// A unit of reversible game-state mutation.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// Changes hp by `delta`, clamped to `[0, max_hp]`.
    ChangeHp { unit: UnitId, delta: i32 },

    /// Grants a skill instantiated from the catalog.
    AddSkill {
        unit: UnitId,
        nid: String,
        initiator: Option<UnitId>,
    },

    /// Removes up to `count` most recent instances of a skill (`None` removes all).
    RemoveSkill {
        unit: UnitId,
        nid: String,
        count: Option<u32>,
    },

    /// Writes one key of an item or skill data bag.
    SetObjData {
        target: ObjRef,
        key: String,
        value: DataValue,
    },

    /// Consumes a charge of `skill`; routed to the skill's charge component.
    TriggerCharge { unit: UnitId, skill: String },

    /// Refills `amount` charges of `skill`, never above `total_charge`.
    RestoreCharge {
        unit: UnitId,
        skill: String,
        amount: u32,
    },

    /// Relocates a unit (shove, pivot, draw).
    ForcedMove { unit: UnitId, to: Position },

    /// Moves an item between inventories.
    TransferItem {
        from: UnitId,
        to: UnitId,
        item: ItemUid,
    },

    /// Requests a scripted event from the host.
    TriggerEvent {
        nid: String,
        unit: UnitId,
        position: Option<Position>,
    },
}

impl Action {
    /// Snake-case name, for logs.
    pub fn name(&self) -> &str {
        self.as_ref()
    }

    /// Unit whose state the action primarily touches, if any.
    pub fn subject(&self) -> Option<UnitId> {
        match self {
            Self::ChangeHp { unit, .. }
            | Self::AddSkill { unit, .. }
            | Self::RemoveSkill { unit, .. }
            | Self::TriggerCharge { unit, .. }
            | Self::RestoreCharge { unit, .. }
            | Self::ForcedMove { unit, .. }
            | Self::TriggerEvent { unit, .. } => Some(*unit),
            Self::TransferItem { from, .. } => Some(*from),
            Self::SetObjData { .. } => None,
        }
    }

    /// Negative hp change applied to `unit` by this action, if any.
    pub fn damage_to(&self, unit: UnitId) -> Option<i32> {
        match self {
            Self::ChangeHp { unit: target, delta } if *target == unit && *delta < 0 => {
                Some(-*delta)
            }
            _ => None,
        }
    }
}
