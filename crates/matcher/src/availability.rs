use canonical::normalize;

use crate::policy::AVAILABILITY_THRESHOLD;
use crate::types::{AvailabilityReport, IngredientMatch, MatchType, MatchesByIngredient, RecipeIngredient};

/// Roll per-ingredient matches into a recipe feasibility report.
///
/// An ingredient is available iff at least one of its matches scores above
/// [`AVAILABILITY_THRESHOLD`]. Ingredients missing from the map have no
/// matches. An empty recipe is trivially makeable at 0%.
pub fn evaluate(
    ingredients: &[RecipeIngredient],
    matches_by_ingredient: &MatchesByIngredient,
) -> AvailabilityReport {
    build_report(ingredients, |ingredient| {
        matches_by_ingredient
            .get(&ingredient.name)
            .is_some_and(|matches| matches.iter().any(clears_threshold))
    })
}

/// Cheap availability estimate over matches that were already fetched.
///
/// Meant for clients that hold match lists but not the taxonomy. It does not
/// re-run the classifier: a match counts only if it clears the threshold and
/// either came from the exact or equivalency tier, or the first word of its
/// product name appears inside the ingredient name. It therefore rejects
/// some category and substitute matches the full [`evaluate`] would accept.
/// Both agree whenever an ingredient's best match is an exact or equivalency
/// match, and whenever it has nothing above the threshold.
///
/// Versioned by [`APPROXIMATION_VERSION`](crate::policy::APPROXIMATION_VERSION).
pub fn approximate_availability(
    ingredients: &[RecipeIngredient],
    matches_by_ingredient: &MatchesByIngredient,
) -> AvailabilityReport {
    build_report(ingredients, |ingredient| {
        let Some(matches) = matches_by_ingredient.get(&ingredient.name) else {
            return false;
        };
        let ingredient_text = normalize(&ingredient.name).into_string();
        matches.iter().filter(|m| clears_threshold(m)).any(|m| {
            matches!(m.match_type, MatchType::Exact | MatchType::Equivalency)
                || normalize(&m.product_name)
                    .first_token()
                    .is_some_and(|head| ingredient_text.contains(head))
        })
    })
}

fn clears_threshold(m: &IngredientMatch) -> bool {
    m.confidence > AVAILABILITY_THRESHOLD
}

fn build_report<F>(ingredients: &[RecipeIngredient], mut is_available: F) -> AvailabilityReport
where
    F: FnMut(&RecipeIngredient) -> bool,
{
    let mut available_ingredients = Vec::new();
    let mut missing_ingredients = Vec::new();
    for ingredient in ingredients {
        if is_available(ingredient) {
            available_ingredients.push(ingredient.name.clone());
        } else {
            missing_ingredients.push(ingredient.name.clone());
        }
    }

    let total_count = ingredients.len();
    let available_count = available_ingredients.len();
    let percentage_available = if total_count == 0 {
        0
    } else {
        (100.0 * available_count as f64 / total_count as f64).round() as u8
    };

    AvailabilityReport {
        can_make: missing_ingredients.is_empty(),
        available_count,
        total_count,
        missing_ingredients,
        available_ingredients,
        percentage_available,
    }
}
