//! Combat-deterministic random numbers.
//!
//! Proc checks must not use a general-purpose RNG: after a turnwheel rewind
//! the host re-resolves the same combat and must observe the same rolls.
//! Every draw is therefore a pure function of the game seed, the action log
//! position at which the combat started, the rolling unit, and a stream
//! position allocated by [`CombatStream`].

use crate::state::UnitId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }
}

/// PCG-XSH-RR: 32-bit output from 64-bit state, one step per seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes the entropy sources of one draw into a seed.
///
/// * `game_seed` - base seed fixed at chapter start
/// * `combat_nonce` - action log position when the combat began
/// * `unit` - unit on whose behalf the draw happens
/// * `stream_position` - position allocated by [`CombatStream`]
pub fn compute_seed(game_seed: u64, combat_nonce: u64, unit: u32, stream_position: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = game_seed;
    hash ^= combat_nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (unit as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (stream_position as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Phase slot used for draws outside of any strike.
pub const PRE_STRIKE_SLOT: u32 = 0;
/// Phase slot used for draws after the last strike.
pub const POST_STRIKE_SLOT: u32 = 0xffff;

/// Allocates stream positions for one combat.
///
/// A position is `(phase slot << 16) | draw index`; the draw index restarts
/// at every sub-combat, so two draws in the same strike get distinct,
/// reproducible positions and never share a seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatStream {
    game_seed: u64,
    combat_nonce: u64,
    slot: u32,
    draws: u32,
}

impl CombatStream {
    pub fn new(game_seed: u64, combat_nonce: u64) -> Self {
        Self {
            game_seed,
            combat_nonce,
            slot: PRE_STRIKE_SLOT,
            draws: 0,
        }
    }

    /// Moves the stream to a new phase slot (strike `n` uses slot `n + 1`).
    pub fn enter_slot(&mut self, slot: u32) {
        self.slot = slot & 0xffff;
        self.draws = 0;
    }

    /// Next stream position; advances the draw counter.
    pub fn next_position(&mut self) -> u32 {
        let position = (self.slot << 16) | (self.draws & 0xffff);
        self.draws += 1;
        position
    }

    /// Rolls a d100 for `unit` at the next stream position.
    pub fn roll_d100(&mut self, rng: &dyn RngOracle, unit: UnitId) -> u32 {
        let position = self.next_position();
        rng.roll_d100(compute_seed(
            self.game_seed,
            self.combat_nonce,
            unit.0,
            position,
        ))
    }

    pub fn combat_nonce(&self) -> u64 {
        self.combat_nonce
    }
}
