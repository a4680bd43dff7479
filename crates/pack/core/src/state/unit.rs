//! Combatants and the items/skills they own.

use std::sync::Arc;

use crate::components::Component;

use super::common::{ItemUid, Position, SkillUid, Team, UnitId};
use super::data::DataBag;

/// Immutable, shared component descriptors attached to an item or skill.
///
/// The set is configuration only: cloning an instance never clones behavior
/// state, and per-combat scratch lives in the lifecycle arena instead.
pub type ComponentSet = Arc<[Component]>;

/// Inclusive attack range of an item, in grid distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponRange {
    pub min: u32,
    pub max: u32,
}

impl WeaponRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: u32) -> bool {
        distance >= self.min && distance <= self.max
    }
}

impl Default for WeaponRange {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// One item in a unit's inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub uid: ItemUid,
    pub nid: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: DataBag,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: WeaponRange,
    pub components: ComponentSet,
}

impl ItemInstance {
    /// Weapon family from the `weapon_type` data key (`sword`, `lance`, ...).
    pub fn weapon_type(&self) -> Option<&str> {
        self.data.get("weapon_type").and_then(|v| v.as_text())
    }

    /// Locked items cannot be stolen or traded.
    pub fn is_locked(&self) -> bool {
        self.data.flag("locked")
    }
}

/// One skill instance held by a unit. Several instances with the same nid are stacks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillInstance {
    pub uid: SkillUid,
    pub nid: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: DataBag,
    /// Unit that granted this skill, if any (e.g. the attacker who poisoned us).
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiator: Option<UnitId>,
    pub components: ComponentSet,
}

impl SkillInstance {
    pub fn has_component(&self, predicate: impl Fn(&Component) -> bool) -> bool {
        self.components.iter().any(predicate)
    }
}

/// Terrain movement class used for per-tile movement cost lookups.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementGroup {
    #[default]
    Foot,
    Armored,
    Mounted,
    Flying,
}

/// A combatant on the board.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: UnitId,
    pub nid: String,
    pub team: Team,
    /// `None` once the unit has left the board.
    pub position: Option<Position>,
    pub hp: i32,
    pub max_hp: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement_group: MovementGroup,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemInstance>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillInstance>,
}

impl UnitState {
    pub fn new(id: UnitId, nid: impl Into<String>, team: Team, position: Position, hp: i32) -> Self {
        Self {
            id,
            nid: nid.into(),
            team,
            position: Some(position),
            hp,
            max_hp: hp,
            movement_group: MovementGroup::default(),
            items: Vec::new(),
            skills: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_ally_of(&self, other: &UnitState) -> bool {
        self.team.is_ally_of(other.team)
    }

    pub fn item(&self, uid: ItemUid) -> Option<&ItemInstance> {
        self.items.iter().find(|item| item.uid == uid)
    }

    pub fn skill(&self, uid: SkillUid) -> Option<&SkillInstance> {
        self.skills.iter().find(|skill| skill.uid == uid)
    }

    /// First skill instance with the given nid.
    pub fn skill_by_nid(&self, nid: &str) -> Option<&SkillInstance> {
        self.skills.iter().find(|skill| skill.nid == nid)
    }

    pub fn has_skill(&self, nid: &str) -> bool {
        self.skill_by_nid(nid).is_some()
    }

    /// Number of stacked instances of a skill.
    pub fn stacks(&self, nid: &str) -> usize {
        self.skills.iter().filter(|skill| skill.nid == nid).count()
    }

    pub fn skill_nids(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.nid.as_str())
    }

    /// Returns true if any held skill carries a component matching `predicate`.
    pub fn has_skill_component(&self, predicate: impl Fn(&Component) -> bool + Copy) -> bool {
        self.skills.iter().any(|skill| skill.has_component(predicate))
    }
}
