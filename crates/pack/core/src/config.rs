/// Pack-wide tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PackConfig {
    /// Upper bound on strikes in one combat exchange.
    pub max_strikes: u32,
    /// Proc rates above this percentage are clamped.
    pub proc_rate_cap: u32,
    /// Base seed of the combat-deterministic random stream.
    pub game_seed: u64,
}

impl PackConfig {
    pub const DEFAULT_MAX_STRIKES: u32 = 8;
    pub const DEFAULT_PROC_RATE_CAP: u32 = 100;

    pub fn new() -> Self {
        Self {
            max_strikes: Self::DEFAULT_MAX_STRIKES,
            proc_rate_cap: Self::DEFAULT_PROC_RATE_CAP,
            game_seed: 0,
        }
    }

    pub fn with_game_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }

    pub fn with_max_strikes(mut self, max_strikes: u32) -> Self {
        self.max_strikes = max_strikes;
        self
    }
}

impl Default for PackConfig {
    fn default() -> Self {
        Self::new()
    }
}
