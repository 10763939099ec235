use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Resolved taxonomy data for one normalized ingredient term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Normalized term this entry describes.
    pub term: String,
    /// Terms considered interchangeable with `term`. The relation is kept
    /// symmetric across the global table.
    #[serde(default)]
    pub equivalents: BTreeSet<String>,
    /// Category label, lowercase ("dairy", "produce").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Terms that may stand in for `term`. Directional: B being a substitute
    /// for A says nothing about A standing in for B.
    #[serde(default)]
    pub substitutes: BTreeSet<String>,
}

impl TaxonomyEntry {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            equivalents: BTreeSet::new(),
            category: None,
            substitutes: BTreeSet::new(),
        }
    }
}

/// Household-scoped override of a single term.
///
/// Each `Some` field replaces the global field wholesale; `None` keeps the
/// global value. Sets are never merged item by item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOverride {
    #[serde(default)]
    pub equivalents: Option<BTreeSet<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub substitutes: Option<BTreeSet<String>>,
}

impl EntryOverride {
    /// Apply this override on top of the global entry for `term`, if any.
    pub fn apply(&self, term: &str, base: Option<&TaxonomyEntry>) -> TaxonomyEntry {
        let mut entry = base.cloned().unwrap_or_else(|| TaxonomyEntry::new(term));
        if let Some(equivalents) = &self.equivalents {
            entry.equivalents = equivalents.clone();
        }
        if let Some(category) = &self.category {
            entry.category = Some(category.clone());
        }
        if let Some(substitutes) = &self.substitutes {
            entry.substitutes = substitutes.clone();
        }
        entry
    }
}

/// On-disk taxonomy document, before normalization.
///
/// ```yaml
/// version: 1
/// entries:
///   - term: butter
///     category: dairy
///     substitutes: [margarine, ghee]
/// equivalency_groups:
///   - [scallion, green onion, spring onion]
/// households:
///   household-42:
///     - term: butter
///       substitutes: [coconut oil]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    #[serde(default = "TaxonomyDocument::default_version")]
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
    #[serde(default)]
    pub equivalency_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub households: BTreeMap<String, Vec<OverrideSpec>>,
}

impl TaxonomyDocument {
    pub(crate) fn default_version() -> u32 {
        1
    }
}

/// A global entry as written in a taxonomy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrySpec {
    pub term: String,
    #[serde(default)]
    pub equivalents: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub substitutes: Vec<String>,
}

/// A household override as written in a taxonomy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideSpec {
    pub term: String,
    #[serde(default)]
    pub equivalents: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub substitutes: Option<Vec<String>>,
}
