//! Collaborators the host lends to every hook call.
//!
//! Oracles expose map geometry, the game database, the designer expression
//! evaluator, and the deterministic RNG. [`Env`] bundles them so components
//! never reach for global game state and can be exercised against fakes.
mod catalog;
mod error;
mod eval;
mod map;
mod rng;

pub use catalog::{CatalogOracle, ItemPrefab, MemoryCatalog, SkillPrefab};
pub use error::OracleError;
pub use eval::{
    EvalContext, EvalError, EvalValue, Evaluator, LiteralEvaluator, evaluate_bool_or,
    evaluate_int_or,
};
pub use map::{GridMap, IMPASSABLE, MapDimensions, MapOracle, TerrainKind};
pub use rng::{
    CombatStream, POST_STRIKE_SLOT, PRE_STRIKE_SLOT, PcgRng, RngOracle, compute_seed,
};

/// Aggregates the read-only oracles required by hooks and the dispatcher.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    map: Option<&'a dyn MapOracle>,
    catalog: Option<&'a dyn CatalogOracle>,
    evaluator: Option<&'a dyn Evaluator>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> Env<'a> {
    pub fn new(
        map: Option<&'a dyn MapOracle>,
        catalog: Option<&'a dyn CatalogOracle>,
        evaluator: Option<&'a dyn Evaluator>,
        rng: Option<&'a dyn RngOracle>,
    ) -> Self {
        Self {
            map,
            catalog,
            evaluator,
            rng,
        }
    }

    pub fn with_all(
        map: &'a dyn MapOracle,
        catalog: &'a dyn CatalogOracle,
        evaluator: &'a dyn Evaluator,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self::new(Some(map), Some(catalog), Some(evaluator), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            catalog: None,
            evaluator: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    pub fn map(&self) -> Result<&'a dyn MapOracle, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the CatalogOracle, or an error if not available.
    pub fn catalog(&self) -> Result<&'a dyn CatalogOracle, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the Evaluator, or an error if not available.
    pub fn evaluator(&self) -> Result<&'a dyn Evaluator, OracleError> {
        self.evaluator.ok_or(OracleError::EvaluatorNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// True when the catalog knows the skill. A missing catalog knows nothing.
    pub fn skill_exists(&self, nid: &str) -> bool {
        self.catalog.is_some_and(|catalog| catalog.has_skill(nid))
    }

    /// True when the catalog knows the event. A missing catalog knows nothing.
    pub fn event_exists(&self, nid: &str) -> bool {
        self.catalog.is_some_and(|catalog| catalog.has_event(nid))
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("map", &self.map.is_some())
            .field("catalog", &self.catalog.is_some())
            .field("evaluator", &self.evaluator.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}
