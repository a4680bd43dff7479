//! The roster of combatants and the uid allocators.

use crate::components;

use super::common::{ItemUid, Position, SkillUid, UnitId};
use super::data::DataBag;
use super::error::StateError;
use super::unit::{ComponentSet, ItemInstance, SkillInstance, UnitState, WeaponRange};

/// A scripted event requested by a component, waiting for the host's event engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRequest {
    pub nid: String,
    pub unit: UnitId,
    pub position: Option<Position>,
}

/// Mutable game state visible to the component pack.
///
/// Components receive `&WorldState` only. Every persistent change flows
/// through [`crate::action::Action`] so the action log can undo it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    units: Vec<UnitState>,
    next_item_uid: u32,
    next_skill_uid: u32,
    pending_events: Vec<EventRequest>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit to the roster.
    ///
    /// Uids of the unit's items and skills are re-allocated so they stay unique.
    pub fn insert_unit(&mut self, mut unit: UnitState) -> Result<UnitId, StateError> {
        if self.unit(unit.id).is_some() {
            return Err(StateError::DuplicateUnit(unit.id));
        }
        if unit.hp < 0 || unit.max_hp < 0 {
            return Err(StateError::NegativeHp {
                unit: unit.id,
                hp: unit.hp,
                max_hp: unit.max_hp,
            });
        }
        if let Some(position) = unit.position {
            if self.unit_at(position).is_some() {
                return Err(StateError::TileOccupied {
                    x: position.x,
                    y: position.y,
                });
            }
        }
        for item in &mut unit.items {
            item.uid = self.allocate_item_uid();
        }
        for skill in &mut unit.skills {
            skill.uid = self.allocate_skill_uid();
        }
        let id = unit.id;
        self.units.push(unit);
        Ok(id)
    }

    /// Builds an item instance with a fresh uid and initialized data.
    pub fn create_item(
        &mut self,
        nid: impl Into<String>,
        range: WeaponRange,
        data: DataBag,
        components: ComponentSet,
    ) -> ItemInstance {
        let mut data = data;
        components::run_init(&components, &mut data);
        ItemInstance {
            uid: self.allocate_item_uid(),
            nid: nid.into(),
            data,
            range,
            components,
        }
    }

    /// Builds a skill instance with a fresh uid and initialized data.
    pub fn create_skill(
        &mut self,
        nid: impl Into<String>,
        components: ComponentSet,
        initiator: Option<UnitId>,
    ) -> SkillInstance {
        let mut data = DataBag::new();
        components::run_init(&components, &mut data);
        SkillInstance {
            uid: self.allocate_skill_uid(),
            nid: nid.into(),
            data,
            initiator,
            components,
        }
    }

    /// Setup helper: gives an item to a unit outside of any combat.
    pub fn give_item(&mut self, unit: UnitId, item: ItemInstance) -> Result<ItemUid, StateError> {
        let uid = item.uid;
        self.unit_mut(unit)
            .ok_or(StateError::UnitNotFound(unit))?
            .items
            .push(item);
        Ok(uid)
    }

    /// Setup helper: gives a skill to a unit outside of any combat.
    pub fn give_skill(
        &mut self,
        unit: UnitId,
        skill: SkillInstance,
    ) -> Result<SkillUid, StateError> {
        let uid = skill.uid;
        self.unit_mut(unit)
            .ok_or(StateError::UnitNotFound(unit))?
            .skills
            .push(skill);
        Ok(uid)
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitState> {
        self.units.iter()
    }

    /// Unit standing on a tile, if any.
    pub fn unit_at(&self, position: Position) -> Option<&UnitState> {
        self.units
            .iter()
            .find(|unit| unit.position == Some(position))
    }

    /// Allies of `unit` (excluding itself) holding a skill with `nid`, in roster order.
    pub fn allies_holding(&self, unit: UnitId, nid: &str) -> Vec<UnitId> {
        let Some(origin) = self.unit(unit) else {
            return Vec::new();
        };
        self.units
            .iter()
            .filter(|other| other.id != unit && other.is_ally_of(origin) && other.has_skill(nid))
            .map(|other| other.id)
            .collect()
    }

    pub fn item(&self, uid: ItemUid) -> Option<&ItemInstance> {
        self.units.iter().find_map(|unit| unit.item(uid))
    }

    pub(crate) fn item_mut(&mut self, uid: ItemUid) -> Option<&mut ItemInstance> {
        self.units
            .iter_mut()
            .find_map(|unit| unit.items.iter_mut().find(|item| item.uid == uid))
    }

    pub fn skill(&self, uid: SkillUid) -> Option<&SkillInstance> {
        self.units.iter().find_map(|unit| unit.skill(uid))
    }

    pub(crate) fn skill_mut(&mut self, uid: SkillUid) -> Option<&mut SkillInstance> {
        self.units
            .iter_mut()
            .find_map(|unit| unit.skills.iter_mut().find(|skill| skill.uid == uid))
    }

    /// Events requested by components and not yet consumed by the host.
    pub fn pending_events(&self) -> &[EventRequest] {
        &self.pending_events
    }

    /// Hands pending events to the host's event engine.
    pub fn take_events(&mut self) -> Vec<EventRequest> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn push_event(&mut self, event: EventRequest) {
        self.pending_events.push(event);
    }

    pub(crate) fn truncate_events(&mut self, len: usize) {
        self.pending_events.truncate(len);
    }

    pub(crate) fn allocate_item_uid(&mut self) -> ItemUid {
        let uid = ItemUid(self.next_item_uid);
        self.next_item_uid += 1;
        uid
    }

    pub(crate) fn allocate_skill_uid(&mut self) -> SkillUid {
        let uid = SkillUid(self.next_skill_uid);
        self.next_skill_uid += 1;
        uid
    }

    /// Returns `uid` to the allocator when it was the most recent one handed out.
    pub(crate) fn rewind_skill_uid(&mut self, uid: SkillUid) {
        if self.next_skill_uid == uid.0 + 1 {
            self.next_skill_uid = uid.0;
        }
    }
}
