//! What a component sees when it is called.

use crate::action::Action;
use crate::config::PackConfig;
use crate::env::{CombatStream, Env, EvalContext};
use crate::playback::{PlaybackKind, PlaybackLog};
use crate::state::{ItemInstance, ItemUid, Position, SkillInstance, UnitId, UnitState, WorldState};

use super::hooks::{CombatRole, HookPoint};
use super::scratch::{AttachmentKey, AttachmentSource, Scratch, SessionId};

/// Mutable view handed to lifecycle hooks.
///
/// The world is read-only. Hooks express changes by pushing onto `actions`
/// and `playback`; the dispatcher commits actions through the action log
/// between phases, in attachment order.
pub struct HookContext<'a> {
    pub session: SessionId,
    pub point: HookPoint,
    pub key: AttachmentKey,
    pub owner: UnitId,
    pub opponent: Option<UnitId>,
    /// Item the owner fights with.
    pub item: Option<ItemUid>,
    pub opponent_item: Option<ItemUid>,
    pub role: Option<CombatRole>,
    /// Unit striking in the current sub-combat.
    pub striker: Option<UnitId>,
    pub sub_combat: Option<u32>,
    pub target_position: Option<Position>,
    pub world: &'a WorldState,
    pub env: Env<'a>,
    pub config: &'a PackConfig,
    pub scratch: &'a mut Scratch,
    pub actions: &'a mut Vec<Action>,
    pub playback: &'a mut PlaybackLog,
    pub stream: &'a mut CombatStream,
}

impl<'a> HookContext<'a> {
    pub fn owner_state(&self) -> Option<&'a UnitState> {
        self.world.unit(self.owner)
    }

    pub fn opponent_state(&self) -> Option<&'a UnitState> {
        self.opponent.and_then(|id| self.world.unit(id))
    }

    /// The owner's combat item.
    pub fn combat_item(&self) -> Option<&'a ItemInstance> {
        self.item.and_then(|uid| self.world.item(uid))
    }

    /// Skill instance this component is attached to, if it is a skill component.
    pub fn source_skill(&self) -> Option<&'a SkillInstance> {
        match self.key.source {
            AttachmentSource::Skill(uid) => self.world.skill(uid),
            AttachmentSource::Item(_) => None,
        }
    }

    pub fn is_striker(&self) -> bool {
        self.striker == Some(self.owner)
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Records playback with the owner as attacker, against the opponent.
    ///
    /// Outside of combat the owner is recorded on both sides.
    pub fn record(&mut self, kind: PlaybackKind) {
        let defender = self.opponent.unwrap_or(self.owner);
        self.playback.record(kind, self.owner, defender);
    }
}

/// Read-only view handed to pure predicates.
///
/// Predicates are called speculatively (highlighting, AI) and can neither
/// append actions nor reach scratch.
#[derive(Clone, Copy, Debug)]
pub struct QueryContext<'a> {
    pub world: &'a WorldState,
    pub env: Env<'a>,
    pub unit: UnitId,
    pub item: Option<ItemUid>,
    pub source: Option<AttachmentSource>,
    pub target: Option<UnitId>,
    pub position: Option<Position>,
}

impl<'a> QueryContext<'a> {
    pub fn new(world: &'a WorldState, env: Env<'a>, unit: UnitId) -> Self {
        Self {
            world,
            env,
            unit,
            item: None,
            source: None,
            target: None,
            position: None,
        }
    }

    pub fn with_item(mut self, item: ItemUid) -> Self {
        self.item = Some(item);
        self.source = Some(AttachmentSource::Item(item));
        self
    }

    pub fn with_source(mut self, source: AttachmentSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: Option<UnitId>) -> Self {
        self.target = target;
        self
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    pub fn unit_state(&self) -> Option<&'a UnitState> {
        self.world.unit(self.unit)
    }

    pub fn target_state(&self) -> Option<&'a UnitState> {
        self.target.and_then(|id| self.world.unit(id))
    }

    pub fn item_instance(&self) -> Option<&'a ItemInstance> {
        self.item.and_then(|uid| self.world.item(uid))
    }

    pub fn source_skill(&self) -> Option<&'a SkillInstance> {
        match self.source? {
            AttachmentSource::Skill(uid) => self.world.skill(uid),
            AttachmentSource::Item(_) => None,
        }
    }

    /// Expression bindings for this query; `None` when the unit is gone.
    pub fn eval_context(&self) -> Option<EvalContext<'a>> {
        let unit = self.unit_state()?;
        Some(
            EvalContext::new(unit)
                .with_target(self.target_state())
                .with_item(self.item_instance())
                .with_position(self.position),
        )
    }
}
