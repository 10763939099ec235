//! Workspace umbrella crate for the pantry matching engine.
//!
//! This crate ties the normalizer (`canonical`), the ingredient taxonomy
//! (`taxonomy`) and the tiered matcher (`matcher`) together behind one
//! [`Engine`] configured from YAML. The engine owns the taxonomy snapshot and
//! its refresh; every match call is a pure function of that snapshot and the
//! inventory passed in.
//!
//! ```rust
//! use pantry_match::{Engine, EngineConfig, InventoryProduct, MatchType, RecipeIngredient};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let inventory = vec![InventoryProduct::new("1", "Green Onion Bunch")];
//!
//! let matches = engine.match_ingredient(&RecipeIngredient::new("scallions"), &inventory, None);
//! assert_eq!(matches[0].match_type, MatchType::Equivalency);
//! ```

pub mod config;

pub use crate::config::{ConfigLoadError, EngineConfig, TaxonomyYamlConfig};
pub use canonical::{NormalizedTerm, NormalizerConfig, normalize, normalize_with};
pub use matcher::policy;
pub use matcher::{
    AvailabilityReport, IngredientMatch, IngredientMatcher, InventoryProduct, MatchMetrics,
    MatchType, MatchesByIngredient, RecipeIngredient, approximate_availability, evaluate,
    set_match_metrics,
};
pub use taxonomy::{
    TaxonomyEntry, TaxonomyError, TaxonomyStats, TaxonomyStore, TaxonomyTable,
};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while building or refreshing an [`Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine config error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("taxonomy load failed: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("taxonomy refresh requested but no taxonomy.path is configured")]
    NoTaxonomySource,
}

/// Configured matching engine.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    store: TaxonomyStore,
}

impl Engine {
    /// Validate `config` and load the taxonomy it points at.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let table = load_taxonomy(&config)?;
        let stats = table.stats();
        info!(
            entries = stats.entries,
            households = stats.households,
            rejected = stats.rejected_entries,
            source = %taxonomy_source(&config),
            "taxonomy loaded"
        );
        Ok(Self {
            store: TaxonomyStore::new(table),
            config,
        })
    }

    /// Load a YAML engine config file and build the engine from it.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        Self::new(EngineConfig::from_file(path)?)
    }

    /// Build an engine around an already constructed table.
    pub fn with_taxonomy(config: EngineConfig, table: TaxonomyTable) -> Self {
        Self {
            config,
            store: TaxonomyStore::new(table),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current taxonomy snapshot.
    pub fn taxonomy(&self) -> Arc<TaxonomyTable> {
        self.store.snapshot()
    }

    /// A matcher bound to the current snapshot. Later refreshes do not affect
    /// it.
    pub fn matcher(&self) -> IngredientMatcher {
        IngredientMatcher::new(self.store.snapshot())
    }

    pub fn match_ingredient(
        &self,
        ingredient: &RecipeIngredient,
        inventory: &[InventoryProduct],
        household_id: Option<&str>,
    ) -> Vec<IngredientMatch> {
        self.matcher().classify(ingredient, inventory, household_id)
    }

    pub fn check_recipe(
        &self,
        ingredients: &[RecipeIngredient],
        inventory: &[InventoryProduct],
        household_id: Option<&str>,
    ) -> (MatchesByIngredient, AvailabilityReport) {
        self.matcher().check_recipe(ingredients, inventory, household_id)
    }

    /// Interval for periodic taxonomy reloads, if configured.
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.config.taxonomy.refresh_secs.map(Duration::from_secs)
    }

    /// Reload the taxonomy from its configured path and swap it in.
    ///
    /// On failure the current table stays in place and the error is returned.
    pub fn refresh_taxonomy(&self) -> Result<TaxonomyStats, EngineError> {
        let Some(path) = self.config.taxonomy.path.as_deref() else {
            return Err(EngineError::NoTaxonomySource);
        };
        match TaxonomyTable::from_path(path, self.config.normalizer.clone()) {
            Ok(table) => {
                let stats = table.stats();
                self.store.replace(table);
                Ok(stats)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "taxonomy refresh failed; keeping previous snapshot"
                );
                Err(err.into())
            }
        }
    }
}

fn load_taxonomy(config: &EngineConfig) -> Result<TaxonomyTable, TaxonomyError> {
    match &config.taxonomy.path {
        Some(path) => TaxonomyTable::from_path(path, config.normalizer.clone()),
        None => TaxonomyTable::builtin(config.normalizer.clone()),
    }
}

fn taxonomy_source(config: &EngineConfig) -> String {
    config
        .taxonomy
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "builtin".to_string())
}
