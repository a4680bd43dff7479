//! The component registry.
//!
//! Every behavior a designer can attach is a variant of [`Component`]. A
//! variant wraps its option struct and declares a fixed [`Hooks`] set; the
//! lifecycle dispatcher consults that set and never inspects behavior at
//! run time.
//!
//! # Architecture
//!
//! Enum + struct hybrid, as in the rest of the crate:
//! - option structs live in [`item`] and [`skill`] next to their hooks
//! - `Component` wraps them for serialization and static dispatch
//! - options deserialize with `#[serde(default)]`, so stored content that
//!   predates an option keeps loading

pub mod item;
pub mod skill;

use std::collections::BTreeSet;

use tracing::debug;

use crate::aoe::{Splash, SplashAoe};
use crate::lifecycle::{HookContext, HookPoint, Hooks, QueryContext};
use crate::state::{DataBag, Position, UnitState};

use item::{
    EvalDamageBonus, EvalTargetRestrict, EventAfterCombat, HealOnHit, PivotOptions, ShoveOptions,
    StackCostMulti, StatusAfterCombat, StatusAfterHit, StatusOnHit,
};
use skill::{Charge, CostUses, EvalCondition, Proc, Regenerate, StatusWhenDamaged};

#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr, strum::EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Component {
    // ========================================================================
    // Skills
    // ========================================================================
    Charge(Charge),
    Proc(Proc),
    CostUses(CostUses),
    StatusWhenDamaged(StatusWhenDamaged),
    SurviveLethal,
    Regenerate(Regenerate),
    /// Marker consulted by forced-movement components.
    IgnoreForcedMovement,
    EvalCondition(EvalCondition),
    /// Marker for skills bound to one character.
    PersonalSkill,

    // ========================================================================
    // Items
    // ========================================================================
    StatusAfterCombat(StatusAfterCombat),
    StatusAfterHit(StatusAfterHit),
    StatusOnHit(StatusOnHit),
    RestoreAfterCombat,
    HealOnHit(HealOnHit),
    StealPlus,
    EventAfterCombat(EventAfterCombat),
    StackCostMulti(StackCostMulti),
    Aoe(SplashAoe),
    Shove(ShoveOptions),
    Pivot(PivotOptions),
    Draw(ShoveOptions),
    EvalDamageBonus(EvalDamageBonus),
    EvalTargetRestrict(EvalTargetRestrict),

    // ========================================================================
    // Either
    // ========================================================================
    /// Placeholder carrying an opaque designer value.
    DoNothing(i64),
}

impl Component {
    /// Snake-case component name.
    pub fn nid(&self) -> &'static str {
        self.into()
    }

    /// Hook points and queries this component participates in.
    pub fn hooks(&self) -> Hooks {
        match self {
            Self::Charge(c) => c.hooks(),
            Self::Proc(_) => Proc::HOOKS,
            Self::CostUses(_) => CostUses::HOOKS,
            Self::StatusWhenDamaged(_) => StatusWhenDamaged::HOOKS,
            Self::SurviveLethal => Hooks::CLEANUP_COMBAT,
            Self::Regenerate(_) => Regenerate::HOOKS,
            Self::EvalCondition(_) => EvalCondition::HOOKS,
            Self::StatusAfterCombat(_) => StatusAfterCombat::HOOKS,
            Self::StatusAfterHit(_) => StatusAfterHit::HOOKS,
            Self::StatusOnHit(_) => StatusOnHit::HOOKS,
            Self::RestoreAfterCombat => Hooks::END_COMBAT,
            Self::HealOnHit(_) => HealOnHit::HOOKS,
            Self::StealPlus => Hooks::ON_HIT,
            Self::EventAfterCombat(_) => EventAfterCombat::HOOKS,
            Self::StackCostMulti(_) => StackCostMulti::HOOKS,
            Self::Aoe(_) => Hooks::SPLASH,
            Self::Shove(_) | Self::Pivot(_) | Self::Draw(_) => item::FORCED_HOOKS,
            Self::EvalDamageBonus(_) => EvalDamageBonus::HOOKS,
            Self::EvalTargetRestrict(_) => EvalTargetRestrict::HOOKS,
            Self::IgnoreForcedMovement | Self::PersonalSkill | Self::DoNothing(_) => Hooks::empty(),
        }
    }

    /// Hooks that run even when the owning skill's condition fails.
    ///
    /// Charge bookkeeping must refill and reset at zero charge, a proc must
    /// remove what it granted, and use costs apply whatever the skill state.
    pub fn ignores_condition(&self, point: HookPoint) -> bool {
        match self {
            Self::Charge(_) => matches!(point, HookPoint::CleanupCombat | HookPoint::OnUpkeep),
            Self::Proc(_) => point == HookPoint::EndSubCombat,
            Self::CostUses(_) => true,
            _ => point == HookPoint::EndCombatUnconditional,
        }
    }

    /// One default-configured instance of every component, for tooling.
    pub fn defaults() -> Vec<Component> {
        vec![
            Self::Charge(Charge::default()),
            Self::Proc(Proc::default()),
            Self::CostUses(CostUses::default()),
            Self::StatusWhenDamaged(StatusWhenDamaged::default()),
            Self::SurviveLethal,
            Self::Regenerate(Regenerate::default()),
            Self::IgnoreForcedMovement,
            Self::EvalCondition(EvalCondition::default()),
            Self::PersonalSkill,
            Self::StatusAfterCombat(StatusAfterCombat::default()),
            Self::StatusAfterHit(StatusAfterHit::default()),
            Self::StatusOnHit(StatusOnHit::default()),
            Self::RestoreAfterCombat,
            Self::HealOnHit(HealOnHit::default()),
            Self::StealPlus,
            Self::EventAfterCombat(EventAfterCombat::default()),
            Self::StackCostMulti(StackCostMulti::default()),
            Self::Aoe(SplashAoe::default()),
            Self::Shove(ShoveOptions::default()),
            Self::Pivot(PivotOptions::default()),
            Self::Draw(ShoveOptions::default()),
            Self::EvalDamageBonus(EvalDamageBonus::default()),
            Self::EvalTargetRestrict(EvalTargetRestrict::default()),
            Self::DoNothing(0),
        ]
    }

    // ========================================================================
    // Pure queries
    // ========================================================================

    pub fn init(&self, data: &mut DataBag) {
        if let Self::Charge(c) = self {
            c.init(data);
        }
    }

    pub fn available(&self, query: &QueryContext<'_>) -> bool {
        match self {
            Self::StackCostMulti(c) => c.available(query),
            _ => true,
        }
    }

    pub fn target_restrict(&self, query: &QueryContext<'_>) -> bool {
        match self {
            Self::EvalTargetRestrict(c) => c.target_restrict(query),
            _ => true,
        }
    }

    pub fn condition(&self, query: &QueryContext<'_>) -> bool {
        match self {
            Self::Charge(c) => c.condition(query),
            Self::CostUses(c) => c.condition(query),
            Self::EvalCondition(c) => c.condition(query),
            _ => true,
        }
    }

    pub fn damage_bonus(&self, query: &QueryContext<'_>) -> i64 {
        match self {
            Self::EvalDamageBonus(c) => c.damage_bonus(query),
            _ => 0,
        }
    }

    /// Tiles affected around `position`; `None` for non-splash components.
    pub fn splash(&self, query: &QueryContext<'_>, position: Position) -> Option<Splash> {
        let Self::Aoe(aoe) = self else {
            return None;
        };
        let (user, map) = splash_inputs(query)?;
        Some(aoe.splash(query.world, map, user, position))
    }

    /// Tiles to highlight around `position`; `None` for non-splash components.
    pub fn splash_positions(
        &self,
        query: &QueryContext<'_>,
        position: Position,
    ) -> Option<BTreeSet<Position>> {
        let Self::Aoe(aoe) = self else {
            return None;
        };
        let (user, map) = splash_inputs(query)?;
        Some(aoe.splash_positions(query.world, map, user, position))
    }

    // ========================================================================
    // Lifecycle hooks
    // ========================================================================

    /// Runs the component's handler for `point`.
    ///
    /// The dispatcher only calls this for points in [`Self::hooks`].
    pub fn run_hook(&self, point: HookPoint, ctx: &mut HookContext<'_>) {
        use HookPoint as P;

        match (self, point) {
            (Self::Charge(c), P::EndCombat) => c.end_combat(ctx),
            (Self::Charge(c), P::CleanupCombat) => c.cleanup_combat(ctx),
            (Self::Charge(c), P::OnUpkeep) => c.on_upkeep(ctx),
            (Self::Proc(c), P::StartSubCombat) => c.start_sub_combat(ctx),
            (Self::Proc(c), P::EndSubCombat) => c.end_sub_combat(ctx),
            (Self::CostUses(c), P::OnHit) => c.on_hit(ctx),
            (Self::CostUses(c), P::OnMiss) => c.on_miss(ctx),
            (Self::StatusWhenDamaged(c), P::AfterTakeStrike) => c.after_take_strike(ctx),
            (Self::StatusWhenDamaged(c), P::EndCombat) => c.end_combat(ctx),
            (Self::SurviveLethal, P::CleanupCombat) => skill::survive_lethal(ctx),
            (Self::Regenerate(c), P::OnUpkeep) => c.on_upkeep(ctx),

            (Self::StatusAfterCombat(c), P::EndCombat) => c.end_combat(ctx),
            (Self::StatusAfterHit(c), P::OnHit | P::OnCrit) => c.on_hit(ctx),
            (Self::StatusAfterHit(c), P::EndCombat) => c.end_combat(ctx),
            (Self::StatusOnHit(c), P::OnHit) => c.on_hit(ctx),
            (Self::RestoreAfterCombat, P::EndCombat) => item::restore_after_combat(ctx),
            (Self::HealOnHit(c), P::OnHit) => c.on_hit(ctx),
            (Self::StealPlus, P::OnHit) => item::steal_plus(ctx),
            (Self::EventAfterCombat(c), P::EndCombat) => c.end_combat(ctx),
            (Self::StackCostMulti(c), P::StartCombat) => c.start_combat(ctx),
            (Self::StackCostMulti(c), P::ReverseUse) => c.reverse_use(ctx),
            (Self::Shove(options), P::OnHit) => item::shove(options, ctx),
            (Self::Draw(options), P::OnHit) => item::draw(options, ctx),
            (Self::Pivot(options), P::OnHit) => item::pivot(options, ctx),

            (component, point) => debug!(
                target: "pack::lifecycle",
                component = component.nid(),
                %point,
                "hook point not handled"
            ),
        }
    }
}

fn splash_inputs<'a>(
    query: &QueryContext<'a>,
) -> Option<(&'a UnitState, &'a dyn crate::env::MapOracle)> {
    let user = query.unit_state()?;
    let map = query
        .env
        .map()
        .inspect_err(|error| debug!(target: "pack::lifecycle", %error, "splash skipped"))
        .ok()?;
    Some((user, map))
}

/// Runs `init` of every component declaring it.
pub fn run_init(components: &[Component], data: &mut DataBag) {
    for component in components {
        if component.hooks().contains(Hooks::INIT) {
            component.init(data);
        }
    }
}

/// The charge component of a skill, if any.
pub fn charge_of(components: &[Component]) -> Option<&Charge> {
    components.iter().find_map(|component| match component {
        Component::Charge(charge) => Some(charge),
        _ => None,
    })
}

/// True when every condition component of the queried skill holds.
///
/// Item components and skills without conditions always hold.
pub fn skill_condition(query: &QueryContext<'_>) -> bool {
    let Some(skill) = query.source_skill() else {
        return true;
    };
    skill
        .components
        .iter()
        .filter(|component| component.hooks().contains(Hooks::CONDITION))
        .all(|component| component.condition(query))
}

/// True when the unit holds a skill that blocks forced movement.
pub fn ignores_forced_movement(unit: &UnitState) -> bool {
    unit.has_skill_component(|component| matches!(component, Component::IgnoreForcedMovement))
}
