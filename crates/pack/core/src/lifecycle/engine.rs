//! The combat lifecycle dispatcher.
//!
//! [`CombatEngine::resolve`] drives one exchange between two units through
//! the fixed hook order:
//!
//! ```text
//! start_combat
//!   per strike: start_sub_combat → on_hit | on_miss | on_crit
//!               → after_strike → after_take_strike → end_sub_combat
//! end_combat → end_combat_unconditional → cleanup_combat
//! ```
//!
//! Hooks append to a per-phase action buffer that is committed through the
//! [`ActionLog`] between phases, in attachment order. Scratch lives in the
//! engine's arena for the duration of one session only.

use tracing::{debug, info};

use crate::action::{Action, ActionError, ActionLog, Checkpoint};
use crate::components::skill_condition;
use crate::config::PackConfig;
use crate::env::{CombatStream, Env, POST_STRIKE_SLOT, PRE_STRIKE_SLOT};
use crate::error::{ErrorContext, PackError};
use crate::playback::{PlaybackKind, PlaybackLog};
use crate::state::{ItemUid, Position, UnitId, WorldState};

use super::attachment::{Attachment, gather_all, gather_combat, gather_item};
use super::context::{HookContext, QueryContext};
use super::error::CombatError;
use super::hooks::{CombatRole, HookPoint, TurnPhase};
use super::scratch::{ScratchArena, SessionId};

/// Host-resolved result of one strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeOutcome {
    Hit { damage: i32 },
    Crit { damage: i32 },
    Miss,
}

impl StrikeOutcome {
    fn hook_point(self) -> HookPoint {
        match self {
            Self::Hit { .. } => HookPoint::OnHit,
            Self::Crit { .. } => HookPoint::OnCrit,
            Self::Miss => HookPoint::OnMiss,
        }
    }
}

/// One sub-combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    pub striker: CombatRole,
    pub outcome: StrikeOutcome,
}

impl Strike {
    pub const fn attacker(outcome: StrikeOutcome) -> Self {
        Self {
            striker: CombatRole::Attacker,
            outcome,
        }
    }

    pub const fn defender(outcome: StrikeOutcome) -> Self {
        Self {
            striker: CombatRole::Defender,
            outcome,
        }
    }
}

/// A combat request: who fights with what, and the host's strike results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSpec {
    pub attacker: UnitId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attacker_item: Option<ItemUid>,
    pub defender: UnitId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defender_item: Option<ItemUid>,
    /// Tile the attacker aimed at; defaults to the defender's tile.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_position: Option<Position>,
    pub strikes: Vec<Strike>,
}

/// Summary of a resolved combat or hook run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatReport {
    pub session: SessionId,
    /// Log position before the first committed action.
    pub checkpoint: Checkpoint,
    pub playback: PlaybackLog,
    /// Actions committed to the log.
    pub committed: usize,
    /// Strikes resolved before the exchange ended.
    pub strikes: usize,
    /// A unit died before every requested strike ran.
    pub ended_early: bool,
}

/// Resolves combats and turn hooks against a world.
///
/// The engine owns the scratch arena; one engine is meant to serve a whole
/// chapter so session ids stay unique.
#[derive(Debug, Default)]
pub struct CombatEngine {
    config: PackConfig,
    arena: ScratchArena,
}

impl CombatEngine {
    pub fn new(config: PackConfig) -> Self {
        Self {
            config,
            arena: ScratchArena::new(),
        }
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    pub fn arena(&self) -> &ScratchArena {
        &self.arena
    }

    fn validate(&self, world: &WorldState, spec: &CombatSpec) -> Result<(), CombatError> {
        if spec.attacker == spec.defender {
            return Err(CombatError::SelfTarget(spec.attacker));
        }
        for (unit, item) in [
            (spec.attacker, spec.attacker_item),
            (spec.defender, spec.defender_item),
        ] {
            let state = world.unit(unit).ok_or(CombatError::UnknownUnit(unit))?;
            if let Some(item) = item {
                if state.item(item).is_none() {
                    return Err(CombatError::ItemNotHeld { unit, item });
                }
            }
        }
        if spec.strikes.len() > self.config.max_strikes as usize {
            return Err(CombatError::TooManyStrikes {
                requested: spec.strikes.len(),
                max: self.config.max_strikes,
            });
        }
        Ok(())
    }

    /// Runs the full combat lifecycle and commits every resulting action.
    pub fn resolve(
        &mut self,
        world: &mut WorldState,
        log: &mut ActionLog,
        env: &Env<'_>,
        spec: &CombatSpec,
    ) -> Result<CombatReport, CombatError> {
        self.validate(world, spec)?;

        let target_position = spec
            .target_position
            .or_else(|| world.unit(spec.defender).and_then(|unit| unit.position));
        let attacker = Side::new(spec.attacker, spec.attacker_item, CombatRole::Attacker);
        let defender = Side::new(spec.defender, spec.defender_item, CombatRole::Defender);

        let mut run = HookRunner::open(self, world, log, *env, target_position);
        info!(
            target: "pack::lifecycle",
            session = %run.session,
            attacker = %spec.attacker,
            defender = %spec.defender,
            strikes = spec.strikes.len(),
            "combat started"
        );

        run.start_combat(attacker, defender);

        let mut strikes = 0;
        for (index, strike) in spec.strikes.iter().enumerate() {
            let (striker, struck) = match strike.striker {
                CombatRole::Attacker => (attacker, defender),
                CombatRole::Defender => (defender, attacker),
            };
            if !run.alive(striker.unit) || !run.alive(struck.unit) {
                break;
            }
            run.strike(index as u32, striker, struck, strike.outcome);
            strikes += 1;
        }
        let ended_early = strikes < spec.strikes.len();

        run.end_combat(attacker, defender);
        let report = run.close(strikes, ended_early);
        info!(
            target: "pack::lifecycle",
            session = %report.session,
            committed = report.committed,
            strikes = report.strikes,
            ended_early = report.ended_early,
            "combat resolved"
        );
        Ok(report)
    }

    /// Undoes the cost side of an item use (`reverse_use` hooks).
    pub fn reverse_use(
        &mut self,
        world: &mut WorldState,
        log: &mut ActionLog,
        env: &Env<'_>,
        unit: UnitId,
        item: ItemUid,
    ) -> Result<CombatReport, CombatError> {
        let state = world.unit(unit).ok_or(CombatError::UnknownUnit(unit))?;
        if state.item(item).is_none() {
            return Err(CombatError::ItemNotHeld { unit, item });
        }

        let attachments = gather_item(world, unit, item);
        let mut run = HookRunner::open(self, world, log, *env, None);
        let me = Side {
            unit,
            item: Some(item),
            role: None,
        };
        run.phase(&attachments, HookPoint::ReverseUse, Frame::solo(me));
        Ok(run.close(0, false))
    }

    /// Runs `on_upkeep` or `on_endstep` for everything a unit holds.
    pub fn run_turn_hook(
        &mut self,
        phase: TurnPhase,
        world: &mut WorldState,
        log: &mut ActionLog,
        env: &Env<'_>,
        unit: UnitId,
    ) -> Result<CombatReport, CombatError> {
        if world.unit(unit).is_none() {
            return Err(CombatError::UnknownUnit(unit));
        }

        let attachments = gather_all(world, unit);
        let mut run = HookRunner::open(self, world, log, *env, None);
        let me = Side {
            unit,
            item: None,
            role: None,
        };
        run.phase(&attachments, phase.hook_point(), Frame::solo(me));
        Ok(run.close(0, false))
    }
}

#[derive(Clone, Copy, Debug)]
struct Side {
    unit: UnitId,
    item: Option<ItemUid>,
    role: Option<CombatRole>,
}

impl Side {
    fn new(unit: UnitId, item: Option<ItemUid>, role: CombatRole) -> Self {
        Self {
            unit,
            item,
            role: Some(role),
        }
    }
}

/// Per-call framing of a hook phase.
#[derive(Clone, Copy, Debug)]
struct Frame {
    me: Side,
    them: Option<Side>,
    striker: Option<UnitId>,
    sub_combat: Option<u32>,
}

impl Frame {
    fn solo(me: Side) -> Self {
        Self {
            me,
            them: None,
            striker: None,
            sub_combat: None,
        }
    }

    fn versus(me: Side, them: Side) -> Self {
        Self {
            me,
            them: Some(them),
            striker: None,
            sub_combat: None,
        }
    }

    fn strike(me: Side, them: Side, striker: UnitId, sub_combat: u32) -> Self {
        Self {
            me,
            them: Some(them),
            striker: Some(striker),
            sub_combat: Some(sub_combat),
        }
    }
}

/// One open session: the borrowed world plus everything hooks write into.
struct HookRunner<'r> {
    config: &'r PackConfig,
    arena: &'r mut ScratchArena,
    session: SessionId,
    checkpoint: Checkpoint,
    world: &'r mut WorldState,
    log: &'r mut ActionLog,
    env: Env<'r>,
    stream: CombatStream,
    playback: PlaybackLog,
    committed: usize,
    target_position: Option<Position>,
}

impl<'r> HookRunner<'r> {
    fn open(
        engine: &'r mut CombatEngine,
        world: &'r mut WorldState,
        log: &'r mut ActionLog,
        env: Env<'r>,
        target_position: Option<Position>,
    ) -> Self {
        let checkpoint = log.checkpoint();
        let stream = CombatStream::new(engine.config.game_seed, checkpoint.0 as u64);
        let session = engine.arena.open();
        Self {
            config: &engine.config,
            arena: &mut engine.arena,
            session,
            checkpoint,
            world,
            log,
            env,
            stream,
            playback: PlaybackLog::new(),
            committed: 0,
            target_position,
        }
    }

    fn close(self, strikes: usize, ended_early: bool) -> CombatReport {
        let discarded = self.arena.close(self.session);
        debug!(
            target: "pack::lifecycle",
            session = %self.session,
            discarded,
            "scratch discarded"
        );
        CombatReport {
            session: self.session,
            checkpoint: self.checkpoint,
            playback: self.playback,
            committed: self.committed,
            strikes,
            ended_early,
        }
    }

    fn alive(&self, unit: UnitId) -> bool {
        self.world.unit(unit).is_some_and(|state| state.is_alive())
    }

    fn query(&self, attachment: &Attachment, frame: Frame) -> QueryContext<'_> {
        QueryContext {
            world: self.world,
            env: self.env,
            unit: frame.me.unit,
            item: frame.me.item,
            source: Some(attachment.key.source),
            target: frame.them.map(|side| side.unit),
            position: self.target_position,
        }
    }

    /// Commits hook output in order. Rejected actions are skipped.
    fn commit(&mut self, actions: Vec<Action>) {
        for action in actions {
            let subject = action.subject();
            match self.log.do_action(self.world, &self.env, action) {
                Ok(()) => self.committed += 1,
                Err(error) => {
                    let mut context = ErrorContext::new(self.log.position());
                    if let Some(unit) = subject {
                        context = context.with_unit(unit);
                    }
                    if let ActionError::Occupied(position) = &error {
                        context = context.with_position(*position);
                    }
                    debug!(
                        target: "pack::lifecycle",
                        session = %self.session,
                        code = error.error_code(),
                        severity = error.severity().as_str(),
                        ?context,
                        "hook action skipped"
                    );
                }
            }
        }
    }

    /// Skill gate for one hook call. `end_combat` also needs the condition to
    /// have held when the combat started.
    fn condition_holds(&self, attachment: &Attachment, point: HookPoint, frame: Frame) -> bool {
        if !skill_condition(&self.query(attachment, frame)) {
            return false;
        }
        point != HookPoint::EndCombat
            || self
                .arena
                .scratch(self.session, attachment.key)
                .and_then(|scratch| scratch.condition_at_start)
                .unwrap_or(true)
    }

    /// Calls every attachment declaring `point`, appending to `actions`.
    fn dispatch(
        &mut self,
        attachments: &[Attachment],
        point: HookPoint,
        frame: Frame,
        actions: &mut Vec<Action>,
    ) {
        for attachment in attachments {
            let component = attachment.component();
            let Some(effective) = point.resolve_for(component.hooks()) else {
                continue;
            };

            if !component.ignores_condition(point) && !self.condition_holds(attachment, point, frame)
            {
                debug!(
                    target: "pack::lifecycle",
                    component = component.nid(),
                    owner = %frame.me.unit,
                    %point,
                    "hook skipped, condition did not hold"
                );
                continue;
            }

            let scratch = self.arena.scratch_mut(self.session, attachment.key);
            let mut ctx = HookContext {
                session: self.session,
                point: effective,
                key: attachment.key,
                owner: frame.me.unit,
                opponent: frame.them.map(|side| side.unit),
                item: frame.me.item,
                opponent_item: frame.them.and_then(|side| side.item),
                role: frame.me.role,
                striker: frame.striker,
                sub_combat: frame.sub_combat,
                target_position: self.target_position,
                world: self.world,
                env: self.env,
                config: self.config,
                scratch,
                actions: &mut *actions,
                playback: &mut self.playback,
                stream: &mut self.stream,
            };
            component.run_hook(effective, &mut ctx);
        }
    }

    /// Dispatches one phase for a single side and commits it.
    fn phase(&mut self, attachments: &[Attachment], point: HookPoint, frame: Frame) {
        let mut actions = Vec::new();
        self.dispatch(attachments, point, frame, &mut actions);
        self.commit(actions);
    }

    fn start_combat(&mut self, attacker: Side, defender: Side) {
        self.stream.enter_slot(PRE_STRIKE_SLOT);
        let ours = gather_combat(self.world, attacker.unit, attacker.item);
        let theirs = gather_combat(self.world, defender.unit, defender.item);

        for (attachments, me, them) in [(&ours, attacker, defender), (&theirs, defender, attacker)] {
            for attachment in attachments {
                let holds = skill_condition(&self.query(attachment, Frame::versus(me, them)));
                self.arena
                    .scratch_mut(self.session, attachment.key)
                    .condition_at_start = Some(holds);
            }
        }

        let mut actions = Vec::new();
        self.dispatch(&ours, HookPoint::StartCombat, Frame::versus(attacker, defender), &mut actions);
        self.dispatch(&theirs, HookPoint::StartCombat, Frame::versus(defender, attacker), &mut actions);
        self.commit(actions);
    }

    fn strike(&mut self, index: u32, striker: Side, struck: Side, outcome: StrikeOutcome) {
        self.stream.enter_slot(index + 1);
        let as_striker = Frame::strike(striker, struck, striker.unit, index);
        let as_struck = Frame::strike(struck, striker, striker.unit, index);

        let ours = gather_combat(self.world, striker.unit, striker.item);
        let theirs = gather_combat(self.world, struck.unit, struck.item);
        let mut actions = Vec::new();
        self.dispatch(&ours, HookPoint::StartSubCombat, as_striker, &mut actions);
        self.dispatch(&theirs, HookPoint::StartSubCombat, as_struck, &mut actions);
        self.commit(actions);

        // Procs may have granted transient skills that take part in this strike.
        let ours = gather_combat(self.world, striker.unit, striker.item);
        let theirs = gather_combat(self.world, struck.unit, struck.item);

        let mut actions = Vec::new();
        let (kind, damage) = match outcome {
            StrikeOutcome::Hit { damage } => (PlaybackKind::DamageHit { damage }, damage),
            StrikeOutcome::Crit { damage } => (PlaybackKind::CritHit { damage }, damage),
            StrikeOutcome::Miss => (PlaybackKind::Miss, 0),
        };
        if damage > 0 {
            actions.push(Action::ChangeHp {
                unit: struck.unit,
                delta: -damage,
            });
        }
        self.playback.record(kind, striker.unit, struck.unit);

        self.dispatch(&ours, outcome.hook_point(), as_striker, &mut actions);
        self.dispatch(&ours, HookPoint::AfterStrike, as_striker, &mut actions);
        self.dispatch(&theirs, HookPoint::AfterTakeStrike, as_struck, &mut actions);
        self.commit(actions);

        let mut actions = Vec::new();
        self.dispatch(&ours, HookPoint::EndSubCombat, as_striker, &mut actions);
        self.dispatch(&theirs, HookPoint::EndSubCombat, as_struck, &mut actions);
        self.commit(actions);
    }

    fn end_combat(&mut self, attacker: Side, defender: Side) {
        self.stream.enter_slot(POST_STRIKE_SLOT);
        let ours = gather_combat(self.world, attacker.unit, attacker.item);
        let theirs = gather_combat(self.world, defender.unit, defender.item);
        let ours_frame = Frame::versus(attacker, defender);
        let theirs_frame = Frame::versus(defender, attacker);

        for point in [
            HookPoint::EndCombat,
            HookPoint::EndCombatUnconditional,
            HookPoint::CleanupCombat,
        ] {
            let mut actions = Vec::new();
            self.dispatch(&ours, point, ours_frame, &mut actions);
            self.dispatch(&theirs, point, theirs_frame, &mut actions);
            self.commit(actions);
        }
    }
}
