//! # Pantry matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides whether a household's inventory can satisfy a recipe
//! ingredient, and how. It sits on top of the normalizer (`canonical`) and the
//! ingredient taxonomy (`taxonomy`) and is pure with respect to its inputs: a
//! taxonomy snapshot plus the inventory passed with each call.
//!
//! ## Tiers
//!
//! Each inventory product is tested against five tiers in precedence order;
//! the first tier that fires is the product's match.
//!
//! | tier          | fires when                                          | confidence      |
//! |---------------|-----------------------------------------------------|-----------------|
//! | `exact`       | normalized names are identical                      | 100             |
//! | `equivalency` | product is a known equivalent (either direction)    | 90              |
//! | `partial`     | ingredient tokens occur in product tokens           | 30..=60, scaled |
//! | `category`    | taxonomy category equals the product's category     | 40              |
//! | `substitute`  | product is a declared substitute for the ingredient | 35              |
//!
//! Matches are ordered by confidence, then tier, then product name and id,
//! so the ranking is total and reproducible. The numbers live in [`policy`].
//!
//! ## Core types
//!
//! - [`IngredientMatcher`]: classifier bound to one taxonomy snapshot.
//! - [`InventoryProduct`], [`RecipeIngredient`]: request inputs.
//! - [`IngredientMatch`]: a scored, explained candidate.
//! - [`AvailabilityReport`]: recipe feasibility, built by [`evaluate`] or the
//!   cheaper client-side [`approximate_availability`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use canonical::NormalizerConfig;
//! use matcher::{IngredientMatcher, InventoryProduct, MatchType, RecipeIngredient};
//! use taxonomy::TaxonomyTable;
//!
//! let table = TaxonomyTable::builtin(NormalizerConfig::default()).unwrap();
//! let matcher = IngredientMatcher::new(Arc::new(table));
//!
//! let inventory = vec![InventoryProduct::new("1", "Green Onion Bunch")];
//! let matches = matcher.classify(&RecipeIngredient::new("scallions"), &inventory, None);
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].match_type, MatchType::Equivalency);
//! assert_eq!(matches[0].confidence, 90);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-ingredient latency and match counts. Classification also emits
//! `tracing` debug events.

mod availability;
pub mod engine;
pub mod metrics;
pub mod policy;
pub mod scoring;
pub mod types;

pub use crate::availability::{approximate_availability, evaluate};
pub use crate::engine::IngredientMatcher;
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    AvailabilityReport, IngredientMatch, InventoryProduct, MatchType, MatchesByIngredient,
    RecipeIngredient,
};
