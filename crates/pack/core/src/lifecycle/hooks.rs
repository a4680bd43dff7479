use bitflags::bitflags;

bitflags! {
    /// Lifecycle capabilities a component declares.
    ///
    /// The dispatcher only calls a component for hook points in its set.
    /// Query flags (`AVAILABLE` .. `DAMAGE_BONUS`) mark pure predicates;
    /// the rest mark hooks that may append actions and playback.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Hooks: u32 {
        const AVAILABLE                = 1 << 0;
        const TARGET_RESTRICT          = 1 << 1;
        const SPLASH                   = 1 << 2;
        const CONDITION                = 1 << 3;
        const INIT                     = 1 << 4;
        const DAMAGE_BONUS             = 1 << 5;
        const START_COMBAT             = 1 << 6;
        const START_SUB_COMBAT         = 1 << 7;
        const ON_HIT                   = 1 << 8;
        const ON_MISS                  = 1 << 9;
        const ON_CRIT                  = 1 << 10;
        const AFTER_STRIKE             = 1 << 11;
        const AFTER_TAKE_STRIKE        = 1 << 12;
        const END_SUB_COMBAT           = 1 << 13;
        const END_COMBAT               = 1 << 14;
        const END_COMBAT_UNCONDITIONAL = 1 << 15;
        const CLEANUP_COMBAT           = 1 << 16;
        const ON_UPKEEP                = 1 << 17;
        const ON_ENDSTEP               = 1 << 18;
        const REVERSE_USE              = 1 << 19;
    }
}

/// Hook points that may append actions, in lifecycle order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum HookPoint {
    StartCombat,
    StartSubCombat,
    OnHit,
    OnMiss,
    OnCrit,
    AfterStrike,
    AfterTakeStrike,
    EndSubCombat,
    EndCombat,
    EndCombatUnconditional,
    CleanupCombat,
    OnUpkeep,
    OnEndstep,
    ReverseUse,
}

impl HookPoint {
    pub const fn flag(self) -> Hooks {
        match self {
            Self::StartCombat => Hooks::START_COMBAT,
            Self::StartSubCombat => Hooks::START_SUB_COMBAT,
            Self::OnHit => Hooks::ON_HIT,
            Self::OnMiss => Hooks::ON_MISS,
            Self::OnCrit => Hooks::ON_CRIT,
            Self::AfterStrike => Hooks::AFTER_STRIKE,
            Self::AfterTakeStrike => Hooks::AFTER_TAKE_STRIKE,
            Self::EndSubCombat => Hooks::END_SUB_COMBAT,
            Self::EndCombat => Hooks::END_COMBAT,
            Self::EndCombatUnconditional => Hooks::END_COMBAT_UNCONDITIONAL,
            Self::CleanupCombat => Hooks::CLEANUP_COMBAT,
            Self::OnUpkeep => Hooks::ON_UPKEEP,
            Self::OnEndstep => Hooks::ON_ENDSTEP,
            Self::ReverseUse => Hooks::REVERSE_USE,
        }
    }

    /// Hook point a component with `hooks` actually receives for `self`.
    ///
    /// Crits reach `on_hit` when the component has no crit handler.
    pub fn resolve_for(self, hooks: Hooks) -> Option<HookPoint> {
        if hooks.contains(self.flag()) {
            Some(self)
        } else if self == Self::OnCrit && hooks.contains(Hooks::ON_HIT) {
            Some(Self::OnHit)
        } else {
            None
        }
    }
}

/// Turn boundary for [`CombatEngine::run_turn_hook`](super::CombatEngine::run_turn_hook).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TurnPhase {
    Upkeep,
    Endstep,
}

impl TurnPhase {
    pub const fn hook_point(self) -> HookPoint {
        match self {
            Self::Upkeep => HookPoint::OnUpkeep,
            Self::Endstep => HookPoint::OnEndstep,
        }
    }
}

/// Side of the exchange a unit fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatRole {
    Attacker,
    Defender,
}
