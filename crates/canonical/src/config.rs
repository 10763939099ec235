//! Configuration types for the name normalizer.
//!
//! This module defines [`NormalizerConfig`], which controls the few knobs the
//! normalization pipeline exposes. The stopword and plural tables are fixed
//! and are not part of the configuration.
//!
//! # Versioning
//!
//! The `version` field tracks normalization behavior. Any change that alters
//! output for some input (a new stopword, a new plural rule) must come with a
//! version bump so cached normalized forms can be told apart.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizerConfig;
//!
//! let config = NormalizerConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.drop_numeric_tokens);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for [`normalize_with`](crate::normalize_with).
///
/// Cheap to clone and serde-friendly so it can be embedded in engine-level
/// YAML configuration.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "drop_numeric_tokens": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Version of the normalization rules.
    ///
    /// Must be >= 1. Validation happens where configuration is loaded so that
    /// normalization itself stays a total function.
    #[serde(default = "NormalizerConfig::default_version")]
    pub version: u32,

    /// Apply Unicode NFKC normalization before case folding.
    ///
    /// Retailer feeds mix composed and decomposed accents ("jalapeño") and
    /// full-width digits; NFKC makes them compare equal.
    #[serde(default = "NormalizerConfig::default_true")]
    pub normalize_unicode: bool,

    /// Drop tokens made only of digits (and hyphens), such as the "4" in
    /// "Butter, 4 ct" or the "1-2" in "1-2 lemons".
    #[serde(default = "NormalizerConfig::default_true")]
    pub drop_numeric_tokens: bool,
}

impl NormalizerConfig {
    fn default_version() -> u32 {
        1
    }

    fn default_true() -> bool {
        true
    }

    /// Check that the configuration can be used.
    pub fn validate(&self) -> Result<(), String> {
        if self.version == 0 {
            return Err("normalizer.version must be >= 1".into());
        }
        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            normalize_unicode: true,
            drop_numeric_tokens: true,
        }
    }
}
