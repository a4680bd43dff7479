//! Data-driven content for the component pack.
//!
//! Loaders read RON/TOML data files into pack-core types:
//! - Pack configuration (TOML)
//! - Skill, item and event catalog (RON)
//! - Grid maps (RON, terrain only)
//! - Combat scenarios (RON, unit placement and scripted strikes)
//!
//! Content is consumed by the host's oracles and never appears in the action log.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, CombatScript, ConfigLoader, ContentFactory, MapLoader, Scenario,
    ScenarioLoader, UnitSpec,
};
