//! # Ingredient taxonomy (`taxonomy`)
//!
//! Reference data that tells the matcher which names mean the same food,
//! which category a food belongs to, and what can stand in for it.
//!
//! - **Equivalents** are symmetric: listing "green onion" under "scallion"
//!   also makes "scallion" an equivalent of "green onion".
//! - **Categories** are a single lowercase label per term.
//! - **Substitutes** are directional: margarine substituting for butter
//!   does not make butter a substitute for margarine.
//!
//! Every term is normalized with [`canonical`] when the table is built, so
//! lookups must use a [`NormalizedTerm`](canonical::NormalizedTerm) produced
//! with the same [`NormalizerConfig`](canonical::NormalizerConfig)
//! ([`TaxonomyTable::normalize`] does this for you).
//!
//! Households can override individual terms. An override replaces whole
//! fields of the global entry; it never merges sets item by item, and it
//! never leaks to other households.
//!
//! ```rust
//! use canonical::NormalizerConfig;
//! use taxonomy::TaxonomyTable;
//!
//! let table = TaxonomyTable::builtin(NormalizerConfig::default()).unwrap();
//! let entry = table.resolve(&table.normalize("Green Onions"), None).unwrap();
//! assert!(entry.equivalents.contains("scallion"));
//! ```
//!
//! Tables are immutable. [`TaxonomyStore`] hands out `Arc` snapshots and swaps
//! in a rebuilt table on refresh.

mod error;
mod store;
mod table;
mod types;

pub use crate::error::TaxonomyError;
pub use crate::store::TaxonomyStore;
pub use crate::table::{TaxonomyStats, TaxonomyTable, TAXONOMY_SCHEMA_VERSION};
pub use crate::types::{EntryOverride, EntrySpec, OverrideSpec, TaxonomyDocument, TaxonomyEntry};
