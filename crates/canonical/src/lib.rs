//! Pantry name normalizer.
//!
//! This crate turns free-text ingredient names ("2 cups Scallions, chopped")
//! and retailer product names ("Kirkland Unsalted Butter, 4 ct") into a
//! deterministic [`NormalizedTerm`] so the matcher can compare the two sides
//! symmetrically.
//!
//! ## What we do
//!
//! - Unicode NFKC normalization (configurable)
//! - Locale-free lowercasing
//! - Punctuation stripping; apostrophes are removed, internal hyphens kept
//! - Stopword removal (articles, connectives, units of measure and packaging)
//! - Dropping bare counts ("4", "12")
//! - Suffix-based singularization with irregular and invariant word lists
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The same input and config
//! give the same term on any machine, and normalizing a term's text again
//! returns the same term.
//!
//! ```rust
//! use canonical::normalize;
//!
//! let term = normalize("Kirkland Unsalted Butter, 4 ct");
//! assert_eq!(term.as_str(), "kirkland unsalted butter");
//! assert_eq!(normalize(term.as_str()), term);
//! ```

mod config;
mod lexicon;
mod pipeline;
mod term;

pub use crate::config::NormalizerConfig;
pub use crate::pipeline::{normalize, normalize_with};
pub use crate::term::NormalizedTerm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize_default() {
        let term = normalize("  The Scallions ");
        assert_eq!(term.as_str(), "scallion");
        assert_eq!(term.tokens(), ["scallion"]);
        assert_eq!(term.first_token(), Some("scallion"));
    }

    #[test]
    fn retailer_product_name() {
        let term = normalize("Kirkland Signature Organic Unsalted Butter, 4 ct");
        assert_eq!(term.as_str(), "kirkland signature organic unsalted butter");
    }

    #[test]
    fn units_and_quantities_are_dropped() {
        assert_eq!(normalize("2 cups all-purpose flour").as_str(), "all-purpose flour");
        assert_eq!(normalize("1 tsp. vanilla extract").as_str(), "vanilla extract");
        assert_eq!(normalize("3 Tbsps olive oil").as_str(), "olive oil");
        assert_eq!(normalize("Green Onion Bunch").as_str(), "green onion");
    }

    #[test]
    fn count_suffix_glued_to_number_is_kept() {
        assert_eq!(normalize("Butter 4ct").as_str(), "butter 4ct");
    }

    #[test]
    fn hyphens_only_survive_inside_words() {
        assert_eq!(normalize("sun-dried tomatoes").as_str(), "sun-dried tomato");
        assert_eq!(normalize("- eggs -").as_str(), "egg");
        assert_eq!(normalize("salt--pepper").as_str(), "salt pepper");
    }

    #[test]
    fn apostrophes_do_not_split_tokens() {
        assert_eq!(normalize("Baker's Chocolate").as_str(), "baker chocolate");
        assert_eq!(normalize("Trader Joe\u{2019}s Eggs").as_str(), "trader joe egg");
    }

    #[test]
    fn empty_and_whitespace_inputs_yield_empty_terms() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n").is_empty());
        assert!(normalize("a cup of the").is_empty());
        assert!(normalize("!!!").is_empty());
    }

    #[test]
    fn unicode_equivalence_nfkc() {
        let composed = normalize("Jalape\u{00F1}o");
        let decomposed = normalize("Jalapen\u{0303}o");
        assert_eq!(composed, decomposed);
        assert_eq!(composed.as_str(), "jalape\u{00F1}o");
    }

    #[test]
    fn disable_unicode_normalization() {
        let cfg = NormalizerConfig {
            normalize_unicode: false,
            ..Default::default()
        };
        let raw = normalize_with("Cafe\u{0301}", &cfg);
        assert_ne!(raw, normalize("Caf\u{00E9}"));
        assert_eq!(normalize("Cafe\u{0301}"), normalize("Caf\u{00E9}"));
    }

    #[test]
    fn numeric_tokens_can_be_kept() {
        let cfg = NormalizerConfig {
            drop_numeric_tokens: false,
            ..Default::default()
        };
        assert_eq!(normalize_with("7 up", &cfg).as_str(), "7 up");
        assert_eq!(normalize("7 up").as_str(), "up");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "Scallions",
            "2 cups All-Purpose Flour, sifted",
            "Great Value Large White Eggs, 12 count",
            "Glasses of Berries",
            "Cups",
            "Trader Joe's Mini Cookies",
            "sun-dried tomatoes in oil",
            "  ",
            "Molasses (unsulphured)",
            "Jalapen\u{0303}os",
            "half & half",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "normalize is not idempotent for {input:?}");
        }
    }

    #[test]
    fn invalid_config_version_rejected() {
        let cfg = NormalizerConfig {
            version: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        assert!(NormalizerConfig::default().validate().is_ok());
    }
}
