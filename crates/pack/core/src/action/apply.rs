//! Applying actions to the world and reverting them.

use tracing::debug;

use crate::components;
use crate::env::Env;
use crate::state::{
    DataBag, DataValue, EventRequest, ItemUid, Position, SkillInstance, SkillUid, UnitId,
    WorldState,
};

use super::{Action, ActionError, ObjRef};

/// A pending write into a data bag, produced by charge components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataWrite {
    pub target: ObjRef,
    pub key: String,
    pub value: DataValue,
}

impl DataWrite {
    pub fn new(target: ObjRef, key: &str, value: impl Into<DataValue>) -> Self {
        Self {
            target,
            key: key.to_owned(),
            value: value.into(),
        }
    }
}

/// Everything needed to revert one applied action.
#[derive(Clone, Debug, PartialEq)]
pub enum UndoRecord {
    Hp {
        unit: UnitId,
        previous: i32,
    },
    SkillAdded {
        unit: UnitId,
        uid: SkillUid,
    },
    /// Removed instances with their original indices, in removal order.
    SkillsRemoved {
        unit: UnitId,
        removed: Vec<(usize, SkillInstance)>,
    },
    Data(Vec<(ObjRef, String, Option<DataValue>)>),
    Position {
        unit: UnitId,
        previous: Option<Position>,
    },
    ItemMoved {
        from: UnitId,
        to: UnitId,
        item: ItemUid,
        index: usize,
    },
    Event {
        previous_len: usize,
    },
    Nothing,
}

fn bag_mut(world: &mut WorldState, target: ObjRef) -> Result<&mut DataBag, ActionError> {
    match target {
        ObjRef::Item(uid) => world
            .item_mut(uid)
            .map(|item| &mut item.data)
            .ok_or(ActionError::ItemNotFound(uid)),
        ObjRef::Skill(uid) => world
            .skill_mut(uid)
            .map(|skill| &mut skill.data)
            .ok_or(ActionError::SkillNotFound(uid)),
    }
}

/// Applies writes atomically: every target is resolved before anything changes.
fn apply_writes(world: &mut WorldState, writes: Vec<DataWrite>) -> Result<UndoRecord, ActionError> {
    for write in &writes {
        bag_mut(world, write.target)?;
    }
    let mut previous = Vec::with_capacity(writes.len());
    for write in writes {
        let bag = bag_mut(world, write.target)?;
        let old = bag.set(write.key.clone(), write.value);
        previous.push((write.target, write.key, old));
    }
    Ok(UndoRecord::Data(previous))
}

impl Action {
    /// Applies the action and returns the record that reverts it.
    pub fn apply(&self, world: &mut WorldState, env: &Env<'_>) -> Result<UndoRecord, ActionError> {
        match self {
            Self::ChangeHp { unit, delta } => {
                let state = world.unit_mut(*unit).ok_or(ActionError::UnitNotFound(*unit))?;
                let previous = state.hp;
                state.hp = (state.hp.saturating_add(*delta)).clamp(0, state.max_hp.max(0));
                Ok(UndoRecord::Hp {
                    unit: *unit,
                    previous,
                })
            }

            Self::AddSkill {
                unit,
                nid,
                initiator,
            } => {
                if world.unit(*unit).is_none() {
                    return Err(ActionError::UnitNotFound(*unit));
                }
                let prefab = env
                    .catalog()?
                    .skill(nid)
                    .ok_or_else(|| ActionError::UnknownSkill(nid.clone()))?;
                let skill = world.create_skill(nid.clone(), prefab.components.clone(), *initiator);
                let uid = skill.uid;
                world
                    .unit_mut(*unit)
                    .ok_or(ActionError::UnitNotFound(*unit))?
                    .skills
                    .push(skill);
                Ok(UndoRecord::SkillAdded { unit: *unit, uid })
            }

            Self::RemoveSkill { unit, nid, count } => {
                let state = world.unit_mut(*unit).ok_or(ActionError::UnitNotFound(*unit))?;
                let limit = count.map_or(usize::MAX, |n| n as usize);
                let mut removed = Vec::new();
                while removed.len() < limit {
                    let Some(index) = state.skills.iter().rposition(|s| &s.nid == nid) else {
                        break;
                    };
                    removed.push((index, state.skills.remove(index)));
                }
                Ok(UndoRecord::SkillsRemoved {
                    unit: *unit,
                    removed,
                })
            }

            Self::SetObjData { target, key, value } => {
                apply_writes(world, vec![DataWrite::new(*target, key, value.clone())])
            }

            Self::TriggerCharge { unit, skill } => {
                let held = held_skill(world, *unit, skill)?;
                match components::charge_of(&held.components) {
                    Some(charge) => {
                        let writes = charge.trigger_writes(world, *unit, held);
                        apply_writes(world, writes)
                    }
                    None => {
                        debug!(
                            target: "pack::action",
                            unit = %unit,
                            skill = %skill,
                            "trigger_charge on a skill without a charge component"
                        );
                        Ok(UndoRecord::Nothing)
                    }
                }
            }

            Self::RestoreCharge {
                unit,
                skill,
                amount,
            } => {
                let held = held_skill(world, *unit, skill)?;
                match components::charge_of(&held.components) {
                    Some(charge) => {
                        let writes = charge.restore_writes(held, *amount);
                        apply_writes(world, writes)
                    }
                    None => Ok(UndoRecord::Nothing),
                }
            }

            Self::ForcedMove { unit, to } => {
                if world.unit_at(*to).is_some_and(|other| other.id != *unit) {
                    return Err(ActionError::Occupied(*to));
                }
                let state = world.unit_mut(*unit).ok_or(ActionError::UnitNotFound(*unit))?;
                let previous = state.position.replace(*to);
                Ok(UndoRecord::Position {
                    unit: *unit,
                    previous,
                })
            }

            Self::TransferItem { from, to, item } => {
                if world.unit(*to).is_none() {
                    return Err(ActionError::UnitNotFound(*to));
                }
                let source = world.unit_mut(*from).ok_or(ActionError::UnitNotFound(*from))?;
                let index = source
                    .items
                    .iter()
                    .position(|i| i.uid == *item)
                    .ok_or(ActionError::ItemNotFound(*item))?;
                let moved = source.items.remove(index);
                world
                    .unit_mut(*to)
                    .ok_or(ActionError::UnitNotFound(*to))?
                    .items
                    .push(moved);
                Ok(UndoRecord::ItemMoved {
                    from: *from,
                    to: *to,
                    item: *item,
                    index,
                })
            }

            Self::TriggerEvent {
                nid,
                unit,
                position,
            } => {
                let previous_len = world.pending_events().len();
                world.push_event(EventRequest {
                    nid: nid.clone(),
                    unit: *unit,
                    position: *position,
                });
                Ok(UndoRecord::Event { previous_len })
            }
        }
    }
}

fn held_skill<'w>(
    world: &'w WorldState,
    unit: UnitId,
    nid: &str,
) -> Result<&'w SkillInstance, ActionError> {
    world
        .unit(unit)
        .ok_or(ActionError::UnitNotFound(unit))?
        .skill_by_nid(nid)
        .ok_or_else(|| ActionError::SkillNotHeld {
            unit,
            nid: nid.to_owned(),
        })
}

impl UndoRecord {
    /// Reverts the change. Records must be reverted in reverse application order.
    pub fn revert(self, world: &mut WorldState) {
        match self {
            Self::Hp { unit, previous } => {
                if let Some(state) = world.unit_mut(unit) {
                    state.hp = previous;
                }
            }
            Self::SkillAdded { unit, uid } => {
                if let Some(state) = world.unit_mut(unit) {
                    state.skills.retain(|skill| skill.uid != uid);
                }
                // LIFO revert: the uid was the last one handed out.
                world.rewind_skill_uid(uid);
            }
            Self::SkillsRemoved { unit, removed } => {
                if let Some(state) = world.unit_mut(unit) {
                    for (index, skill) in removed.into_iter().rev() {
                        let index = index.min(state.skills.len());
                        state.skills.insert(index, skill);
                    }
                }
            }
            Self::Data(entries) => {
                for (target, key, previous) in entries.into_iter().rev() {
                    if let Ok(bag) = bag_mut(world, target) {
                        bag.restore(&key, previous);
                    }
                }
            }
            Self::Position { unit, previous } => {
                if let Some(state) = world.unit_mut(unit) {
                    state.position = previous;
                }
            }
            Self::ItemMoved {
                from,
                to,
                item,
                index,
            } => {
                let moved = world.unit_mut(to).and_then(|state| {
                    let position = state.items.iter().rposition(|i| i.uid == item)?;
                    Some(state.items.remove(position))
                });
                if let (Some(moved), Some(source)) = (moved, world.unit_mut(from)) {
                    let index = index.min(source.items.len());
                    source.items.insert(index, moved);
                }
            }
            Self::Event { previous_len } => world.truncate_events(previous_len),
            Self::Nothing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Team, UnitState};

    #[test]
    fn hp_clamp_survives_a_corrupt_max_hp() {
        let mut world = WorldState::new();
        world
            .insert_unit(UnitState::new(UnitId(1), "knight", Team::Player, Position::ORIGIN, 5))
            .unwrap();
        world.unit_mut(UnitId(1)).unwrap().max_hp = -1;

        let undo = Action::ChangeHp {
            unit: UnitId(1),
            delta: -1,
        }
        .apply(&mut world, &Env::empty())
        .unwrap();

        assert_eq!(world.unit(UnitId(1)).unwrap().hp, 0);
        undo.revert(&mut world);
        assert_eq!(world.unit(UnitId(1)).unwrap().hp, 5);
    }
}
