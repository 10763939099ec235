use std::cmp::Ordering;

use crate::policy::{
    CATEGORY_CONFIDENCE, EQUIVALENCY_CONFIDENCE, EXACT_CONFIDENCE, PARTIAL_MAX_CONFIDENCE,
    PARTIAL_MIN_CONFIDENCE, SUBSTITUTE_CONFIDENCE,
};
use crate::types::{IngredientMatch, MatchType};

/// Base confidence of a tier. Partial matches are scaled separately with
/// [`partial_confidence`]; this returns their ceiling.
pub fn tier_confidence(match_type: MatchType) -> u8 {
    match match_type {
        MatchType::Exact => EXACT_CONFIDENCE,
        MatchType::Equivalency => EQUIVALENCY_CONFIDENCE,
        MatchType::Partial => PARTIAL_MAX_CONFIDENCE,
        MatchType::Category => CATEGORY_CONFIDENCE,
        MatchType::Substitute => SUBSTITUTE_CONFIDENCE,
    }
}

/// `round(60 * matched / total)`, clamped to `[30, 60]`.
pub fn partial_confidence(matched_tokens: usize, ingredient_tokens: usize) -> u8 {
    if ingredient_tokens == 0 {
        return PARTIAL_MIN_CONFIDENCE;
    }
    let matched = matched_tokens.min(ingredient_tokens) as f64;
    let scaled = (f64::from(PARTIAL_MAX_CONFIDENCE) * matched / ingredient_tokens as f64).round();
    (scaled as u8).clamp(PARTIAL_MIN_CONFIDENCE, PARTIAL_MAX_CONFIDENCE)
}

/// Total order over matches: confidence descending, then tier precedence,
/// then product name, then product id.
pub fn compare_matches(a: &IngredientMatch, b: &IngredientMatch) -> Ordering {
    b.confidence
        .cmp(&a.confidence)
        .then_with(|| a.match_type.precedence().cmp(&b.match_type.precedence()))
        .then_with(|| a.product_name.cmp(&b.product_name))
        .then_with(|| a.product_id.cmp(&b.product_id))
}

pub fn rank(matches: &mut [IngredientMatch]) {
    matches.sort_by(compare_matches);
}
