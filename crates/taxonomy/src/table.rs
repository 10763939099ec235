use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use canonical::{normalize_with, NormalizedTerm, NormalizerConfig};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TaxonomyError;
use crate::types::{EntryOverride, EntrySpec, OverrideSpec, TaxonomyDocument, TaxonomyEntry};

/// Highest taxonomy document version this build understands.
pub const TAXONOMY_SCHEMA_VERSION: u32 = 1;

const BUILTIN_TAXONOMY: &str = include_str!("../data/taxonomy.json");

/// Immutable, fully normalized taxonomy reference table.
///
/// Built once from a [`TaxonomyDocument`] and then only read. Refreshing the
/// taxonomy means building a new table and swapping it in through
/// [`TaxonomyStore`](crate::TaxonomyStore); a table is never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct TaxonomyTable {
    version: u32,
    normalizer: NormalizerConfig,
    entries: HashMap<String, TaxonomyEntry>,
    households: HashMap<String, HashMap<String, EntryOverride>>,
    rejected: usize,
    loaded_at: DateTime<Utc>,
}

/// Summary of a loaded table, reported by readiness probes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyStats {
    pub version: u32,
    pub entries: usize,
    pub households: usize,
    pub rejected_entries: usize,
    pub loaded_at: DateTime<Utc>,
}

impl TaxonomyTable {
    /// A table with no entries. Every lookup misses, so matching degrades to
    /// exact and partial tiers.
    pub fn empty(normalizer: NormalizerConfig) -> Self {
        Self {
            version: TAXONOMY_SCHEMA_VERSION,
            normalizer,
            entries: HashMap::new(),
            households: HashMap::new(),
            rejected: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Parse the taxonomy shipped with the crate.
    pub fn builtin(normalizer: NormalizerConfig) -> Result<Self, TaxonomyError> {
        Self::from_json_str(BUILTIN_TAXONOMY, normalizer)
    }

    pub fn from_json_str(json: &str, normalizer: NormalizerConfig) -> Result<Self, TaxonomyError> {
        let doc: TaxonomyDocument = serde_json::from_str(json)?;
        Self::from_document(doc, normalizer)
    }

    pub fn from_yaml_str(yaml: &str, normalizer: NormalizerConfig) -> Result<Self, TaxonomyError> {
        let doc: TaxonomyDocument = serde_yaml::from_str(yaml)?;
        Self::from_document(doc, normalizer)
    }

    /// Load a taxonomy file; the format follows the extension (`.json`,
    /// `.yaml`, `.yml`).
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        normalizer: NormalizerConfig,
    ) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&fs::read_to_string(path)?, normalizer),
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?, normalizer),
            _ => Err(TaxonomyError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Normalize and index a taxonomy document.
    ///
    /// Malformed entries are logged and skipped (or cleaned) rather than
    /// failing the load; only an unsupported document version is an error.
    pub fn from_document(
        doc: TaxonomyDocument,
        normalizer: NormalizerConfig,
    ) -> Result<Self, TaxonomyError> {
        if doc.version == 0 || doc.version > TAXONOMY_SCHEMA_VERSION {
            return Err(TaxonomyError::UnsupportedVersion(doc.version));
        }

        let mut builder = Builder {
            normalizer: &normalizer,
            entries: HashMap::new(),
            rejected: 0,
        };

        for spec in doc.entries {
            builder.add_entry(spec);
        }
        for group in doc.equivalency_groups {
            builder.add_group(group);
        }
        builder.symmetrize();

        let mut households = HashMap::new();
        for (household_id, overrides) in doc.households {
            let household_id = household_id.trim().to_string();
            if household_id.is_empty() {
                warn!("skipping taxonomy overrides with an empty household id");
                builder.rejected += overrides.len();
                continue;
            }
            let mut scoped = HashMap::new();
            for spec in overrides {
                if let Some((term, entry_override)) = builder.build_override(&household_id, spec) {
                    scoped.insert(term, entry_override);
                }
            }
            households.insert(household_id, scoped);
        }

        debug!(
            entries = builder.entries.len(),
            households = households.len(),
            rejected = builder.rejected,
            "taxonomy table built"
        );

        Ok(Self {
            version: doc.version,
            entries: builder.entries,
            rejected: builder.rejected,
            households,
            normalizer,
            loaded_at: Utc::now(),
        })
    }

    /// Resolve a normalized term, optionally scoped to a household.
    ///
    /// Global entry first, then the household override on top (household
    /// wins per field). Returns `None` for unknown terms; never fails.
    pub fn resolve(&self, term: &NormalizedTerm, household_id: Option<&str>) -> Option<TaxonomyEntry> {
        if term.is_empty() {
            return None;
        }
        let key = term.as_str();
        let global = self.entries.get(key);
        let scoped = household_id
            .and_then(|id| self.households.get(id.trim()))
            .and_then(|overrides| overrides.get(key));

        match (global, scoped) {
            (base, Some(entry_override)) => Some(entry_override.apply(key, base)),
            (Some(base), None) => Some(base.clone()),
            (None, None) => None,
        }
    }

    /// Normalizer settings every term in this table was normalized with.
    /// Callers must normalize lookups the same way.
    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    /// Normalize a raw name with this table's normalizer settings.
    pub fn normalize(&self, raw: &str) -> NormalizedTerm {
        normalize_with(raw, &self.normalizer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> TaxonomyStats {
        TaxonomyStats {
            version: self.version,
            entries: self.entries.len(),
            households: self.households.len(),
            rejected_entries: self.rejected,
            loaded_at: self.loaded_at,
        }
    }
}

struct Builder<'a> {
    normalizer: &'a NormalizerConfig,
    entries: HashMap<String, TaxonomyEntry>,
    rejected: usize,
}

impl Builder<'_> {
    fn term(&self, raw: &str) -> Option<String> {
        let term = normalize_with(raw, self.normalizer);
        (!term.is_empty()).then(|| term.into_string())
    }

    /// Normalize a list of related terms, dropping blanks and the owning term.
    fn related(&self, owner: &str, raw: &[String], field: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for item in raw {
            match self.term(item) {
                Some(term) if term == owner => {
                    warn!(term = owner, field, "taxonomy entry lists itself; ignoring");
                }
                Some(term) => {
                    out.insert(term);
                }
                None => warn!(term = owner, field, value = %item, "blank related term; ignoring"),
            }
        }
        out
    }

    fn category(&self, owner: &str, raw: Option<&str>) -> Option<String> {
        let category = raw?.trim().to_lowercase();
        if category.is_empty() {
            warn!(term = owner, "blank taxonomy category; ignoring");
            return None;
        }
        Some(category)
    }

    fn add_entry(&mut self, spec: EntrySpec) {
        let Some(term) = self.term(&spec.term) else {
            warn!(raw = %spec.term, "taxonomy entry term is empty after normalization; skipping");
            self.rejected += 1;
            return;
        };

        let equivalents = self.related(&term, &spec.equivalents, "equivalents");
        let substitutes = self.related(&term, &spec.substitutes, "substitutes");
        let category = self.category(&term, spec.category.as_deref());

        let entry = self
            .entries
            .entry(term.clone())
            .or_insert_with(|| TaxonomyEntry::new(term.clone()));
        if entry.category.is_some() && category.is_some() && entry.category != category {
            warn!(term = %term, "duplicate taxonomy entry with a different category; last one wins");
        }
        entry.equivalents.extend(equivalents);
        entry.substitutes.extend(substitutes);
        if category.is_some() {
            entry.category = category;
        }
    }

    fn add_group(&mut self, group: Vec<String>) {
        let members: BTreeSet<String> = group.iter().filter_map(|raw| self.term(raw)).collect();
        if members.len() < 2 {
            warn!(?group, "equivalency group has fewer than two distinct terms; skipping");
            self.rejected += 1;
            return;
        }
        for member in &members {
            let entry = self
                .entries
                .entry(member.clone())
                .or_insert_with(|| TaxonomyEntry::new(member.clone()));
            entry
                .equivalents
                .extend(members.iter().filter(|other| *other != member).cloned());
        }
    }

    /// Make equivalency symmetric: if A lists B, B lists A.
    fn symmetrize(&mut self) {
        let pairs: Vec<(String, String)> = self
            .entries
            .values()
            .flat_map(|entry| {
                entry
                    .equivalents
                    .iter()
                    .map(move |other| (other.clone(), entry.term.clone()))
            })
            .collect();

        for (term, equivalent) in pairs {
            self.entries
                .entry(term.clone())
                .or_insert_with(|| TaxonomyEntry::new(term))
                .equivalents
                .insert(equivalent);
        }
    }

    fn build_override(
        &mut self,
        household_id: &str,
        spec: OverrideSpec,
    ) -> Option<(String, EntryOverride)> {
        let Some(term) = self.term(&spec.term) else {
            warn!(household_id, raw = %spec.term, "household override term is empty; skipping");
            self.rejected += 1;
            return None;
        };

        let equivalents = spec
            .equivalents
            .as_deref()
            .map(|raw| self.related(&term, raw, "equivalents"));
        let substitutes = spec
            .substitutes
            .as_deref()
            .map(|raw| self.related(&term, raw, "substitutes"));
        let category = self.category(&term, spec.category.as_deref());

        Some((
            term,
            EntryOverride {
                equivalents,
                category,
                substitutes,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::normalize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(json: &str) -> TaxonomyTable {
        TaxonomyTable::from_json_str(json, NormalizerConfig::default()).expect("valid taxonomy")
    }

    #[test]
    fn terms_are_normalized_on_load() {
        let t = table(r#"{"entries": [{"term": "Scallions", "equivalents": ["Green Onions"], "category": " Produce "}]}"#);
        let entry = t.resolve(&normalize("scallion"), None).expect("entry");
        assert_eq!(entry.term, "scallion");
        assert!(entry.equivalents.contains("green onion"));
        assert_eq!(entry.category.as_deref(), Some("produce"));
    }

    #[test]
    fn equivalency_is_symmetric() {
        let t = table(r#"{"entries": [{"term": "scallion", "equivalents": ["green onion"]}]}"#);
        let reverse = t.resolve(&normalize("green onions"), None).expect("reverse entry");
        assert!(reverse.equivalents.contains("scallion"));
        assert_eq!(reverse.category, None);
    }

    #[test]
    fn groups_link_every_member() {
        let t = table(r#"{"equivalency_groups": [["scallion", "green onion", "spring onion"]]}"#);
        let entry = t.resolve(&normalize("spring onion"), None).expect("entry");
        let expected: BTreeSet<String> = ["green onion", "scallion"].iter().map(|s| s.to_string()).collect();
        assert_eq!(entry.equivalents, expected);
    }

    #[test]
    fn substitutes_are_directional() {
        let t = table(r#"{"entries": [{"term": "butter", "substitutes": ["margarine"]}]}"#);
        let butter = t.resolve(&normalize("butter"), None).expect("butter");
        assert!(butter.substitutes.contains("margarine"));
        assert!(t.resolve(&normalize("margarine"), None).is_none());
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let t = table(
            r#"{"entries": [
                {"term": "  "},
                {"term": "the cup"},
                {"term": "butter", "substitutes": ["butter", "", "ghee"], "category": ""}
            ],
            "equivalency_groups": [["milk"], ["egg", "eggs"]]}"#,
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.stats().rejected_entries, 4);
        let butter = t.resolve(&normalize("butter"), None).expect("butter");
        assert_eq!(butter.substitutes.len(), 1);
        assert!(butter.substitutes.contains("ghee"));
        assert_eq!(butter.category, None);
    }

    #[test]
    fn household_override_replaces_fields_wholesale() {
        let t = table(
            r#"{"entries": [{"term": "butter", "category": "dairy", "substitutes": ["margarine", "ghee"]}],
                "households": {"h1": [{"term": "butter", "substitutes": ["coconut oil"]}]}}"#,
        );
        let butter = normalize("butter");

        let global = t.resolve(&butter, None).expect("global");
        assert_eq!(global.substitutes.len(), 2);

        let scoped = t.resolve(&butter, Some("h1")).expect("scoped");
        let expected: BTreeSet<String> = ["coconut oil".to_string()].into_iter().collect();
        assert_eq!(scoped.substitutes, expected);
        assert_eq!(scoped.category.as_deref(), Some("dairy"));

        let other = t.resolve(&butter, Some("h2")).expect("other household");
        assert_eq!(other, global);
    }

    #[test]
    fn household_override_can_add_new_terms() {
        let t = table(r#"{"households": {"h1": [{"term": "Nana's Sauce", "category": "Condiments"}]}}"#);
        let term = normalize("nana's sauce");
        assert!(t.resolve(&term, None).is_none());
        let entry = t.resolve(&term, Some("h1")).expect("household-only entry");
        assert_eq!(entry.category.as_deref(), Some("condiments"));
    }

    #[test]
    fn unknown_and_empty_terms_resolve_to_none() {
        let t = table(r#"{"entries": [{"term": "butter"}]}"#);
        assert!(t.resolve(&normalize("dragonfruit"), None).is_none());
        assert!(t.resolve(&normalize(""), Some("h1")).is_none());
    }

    #[test]
    fn unsupported_version_rejected() {
        let res = TaxonomyTable::from_json_str(r#"{"version": 9}"#, NormalizerConfig::default());
        assert!(matches!(res, Err(TaxonomyError::UnsupportedVersion(9))));
    }

    #[test]
    fn builtin_taxonomy_parses() {
        let t = TaxonomyTable::builtin(NormalizerConfig::default()).expect("builtin");
        assert!(!t.is_empty());
        assert_eq!(t.stats().rejected_entries, 0);
        let scallion = t.resolve(&normalize("scallions"), None).expect("scallion");
        assert!(scallion.equivalents.contains("green onion"));
    }

    #[test]
    fn load_yaml_from_file() {
        let yaml = r#"
version: 1
entries:
  - term: butter
    category: dairy
equivalency_groups:
  - [zucchini, courgette]
"#;
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let t = TaxonomyTable::from_path(file.path(), NormalizerConfig::default()).unwrap();
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn unknown_extension_rejected() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let res = TaxonomyTable::from_path(file.path(), NormalizerConfig::default());
        assert!(matches!(res, Err(TaxonomyError::UnsupportedFormat(_))));
    }
}
