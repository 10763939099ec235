use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use canonical::{NormalizedTerm, NormalizerConfig};
use taxonomy::{TaxonomyEntry, TaxonomyTable};
use tracing::debug;

use crate::availability::evaluate;
use crate::metrics::metrics_recorder;
use crate::policy::{
    CATEGORY_CONFIDENCE, EQUIVALENCY_CONFIDENCE, EXACT_CONFIDENCE, MIN_SUBSTRING_LEN,
    SUBSTITUTE_CONFIDENCE,
};
use crate::scoring::{partial_confidence, rank};
use crate::types::{
    AvailabilityReport, IngredientMatch, InventoryProduct, MatchType, MatchesByIngredient,
    RecipeIngredient,
};


/// Classifies inventory products against recipe ingredients.
///
/// Holds one taxonomy snapshot; build a new matcher (cheap, it is an `Arc`)
/// after the taxonomy is refreshed. Every call is pure with respect to the
/// snapshot and the inventory passed in.
#[derive(Debug, Clone)]
pub struct IngredientMatcher {
    taxonomy: Arc<TaxonomyTable>,
}

/// Tier that fired for one product, before it becomes an [`IngredientMatch`].
struct Verdict {
    match_type: MatchType,
    confidence: u8,
    reason: String,
}

impl Verdict {
    fn new(match_type: MatchType, confidence: u8, reason: String) -> Self {
        Self {
            match_type,
            confidence,
            reason,
        }
    }
}

/// Per-call view of the ingredient side.
struct IngredientContext<'a> {
    term: NormalizedTerm,
    entry: Option<TaxonomyEntry>,
    household_id: Option<&'a str>,
}

impl IngredientMatcher {
    pub fn new(taxonomy: Arc<TaxonomyTable>) -> Self {
        Self { taxonomy }
    }

    /// A matcher with no taxonomy: only exact and partial tiers can fire.
    pub fn without_taxonomy() -> Self {
        Self::new(Arc::new(TaxonomyTable::empty(NormalizerConfig::default())))
    }

    pub fn taxonomy(&self) -> &Arc<TaxonomyTable> {
        &self.taxonomy
    }

    /// Rank every inventory product that satisfies `ingredient`.
    ///
    /// Each product yields at most one match, for the strongest tier that
    /// fires. Products firing no tier are left out. The result is totally
    /// ordered (see [`compare_matches`](crate::scoring::compare_matches)), so
    /// identical inputs always produce identical output.
    pub fn classify(
        &self,
        ingredient: &RecipeIngredient,
        inventory: &[InventoryProduct],
        household_id: Option<&str>,
    ) -> Vec<IngredientMatch> {
        let start = Instant::now();
        let household_id = household_id.map(str::trim).filter(|id| !id.is_empty());

        let term = self.taxonomy.normalize(&ingredient.name);
        let matches = if term.is_empty() {
            debug!(ingredient = %ingredient.name, "ingredient normalizes to nothing; no matches");
            Vec::new()
        } else {
            let ctx = IngredientContext {
                entry: self.taxonomy.resolve(&term, household_id),
                term,
                household_id,
            };

            let mut matches: Vec<IngredientMatch> = inventory
                .iter()
                .filter_map(|product| {
                    let verdict = self.classify_product(&ctx, product)?;
                    Some(IngredientMatch {
                        product_id: product.product_id.clone(),
                        product_name: product.product_name.clone(),
                        match_type: verdict.match_type,
                        confidence: verdict.confidence,
                        reason: verdict.reason,
                        quantity: ingredient.quantity,
                        unit: ingredient.unit.clone(),
                    })
                })
                .collect();
            rank(&mut matches);

            debug!(
                ingredient = %ingredient.name,
                term = %ctx.term,
                taxonomy_hit = ctx.entry.is_some(),
                candidates = inventory.len(),
                matches = matches.len(),
                "ingredient classified"
            );
            matches
        };

        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(
                household_id,
                matches.first().map(|m| m.match_type),
                start.elapsed(),
                matches.len(),
            );
        }

        matches
    }

    /// Classify every ingredient of a recipe and roll the results into an
    /// [`AvailabilityReport`].
    ///
    /// The map is keyed by ingredient name as supplied; repeated names share
    /// one entry.
    pub fn check_recipe(
        &self,
        ingredients: &[RecipeIngredient],
        inventory: &[InventoryProduct],
        household_id: Option<&str>,
    ) -> (MatchesByIngredient, AvailabilityReport) {
        let mut by_ingredient = MatchesByIngredient::with_capacity(ingredients.len());
        for ingredient in ingredients {
            if by_ingredient.contains_key(&ingredient.name) {
                continue;
            }
            let matches = self.classify(ingredient, inventory, household_id);
            by_ingredient.insert(ingredient.name.clone(), matches);
        }
        let report = evaluate(ingredients, &by_ingredient);
        (by_ingredient, report)
    }

    fn classify_product(
        &self,
        ctx: &IngredientContext<'_>,
        product: &InventoryProduct,
    ) -> Option<Verdict> {
        let product_term = self.taxonomy.normalize(&product.product_name);
        if product_term.is_empty() {
            return None;
        }

        if product_term == ctx.term {
            return Some(Verdict::new(
                MatchType::Exact,
                EXACT_CONFIDENCE,
                "exact name match".to_string(),
            ));
        }

        if let Some(verdict) = self.equivalency(ctx, &product_term) {
            return Some(verdict);
        }

        if let Some(verdict) = partial(&ctx.term, &product_term) {
            return Some(verdict);
        }

        let entry = ctx.entry.as_ref()?;

        if let (Some(category), Some(product_category)) = (&entry.category, &product.category) {
            if product_category.trim().to_lowercase() == *category {
                return Some(Verdict::new(
                    MatchType::Category,
                    CATEGORY_CONFIDENCE,
                    format!("shares category \"{category}\""),
                ));
            }
        }

        let substitute = find_member(&entry.substitutes, &product_term)?;
        Some(Verdict::new(
            MatchType::Substitute,
            SUBSTITUTE_CONFIDENCE,
            format!("\"{substitute}\" is a declared substitute for \"{}\"", ctx.term),
        ))
    }

    /// Product belongs to the ingredient's equivalency set, or the ingredient
    /// belongs to the product's.
    fn equivalency(&self, ctx: &IngredientContext<'_>, product_term: &NormalizedTerm) -> Option<Verdict> {
        if let Some(equivalent) = ctx
            .entry
            .as_ref()
            .and_then(|entry| find_member(&entry.equivalents, product_term))
        {
            return Some(Verdict::new(
                MatchType::Equivalency,
                EQUIVALENCY_CONFIDENCE,
                format!("\"{equivalent}\" is an equivalent of \"{}\"", ctx.term),
            ));
        }

        let product_entry = self.taxonomy.resolve(product_term, ctx.household_id)?;
        let equivalent = find_member(&product_entry.equivalents, &ctx.term)?;
        Some(Verdict::new(
            MatchType::Equivalency,
            EQUIVALENCY_CONFIDENCE,
            format!("\"{equivalent}\" is an equivalent of \"{product_term}\""),
        ))
    }
}

/// The member of `set` equal to the whole normalized `term`. Longer product
/// names that merely mention a member are left to the partial tier.
fn find_member<'s>(set: &'s BTreeSet<String>, term: &NormalizedTerm) -> Option<&'s str> {
    set.get(term.as_str()).map(String::as_str)
}

/// Token-overlap tier. Fires when ingredient tokens occur in product tokens
/// and the overlap touches the first token of either side.
fn partial(ingredient: &NormalizedTerm, product: &NormalizedTerm) -> Option<Verdict> {
    let ingredient_tokens: BTreeSet<&str> = ingredient.tokens().iter().map(String::as_str).collect();

    let mut matched: Vec<&str> = Vec::new();
    let mut covers_product_head = false;
    for token in ingredient.tokens().iter().map(String::as_str) {
        if matched.contains(&token) {
            continue;
        }
        let mut hit = false;
        for (idx, product_token) in product.tokens().iter().enumerate() {
            if token_matches(token, product_token) {
                hit = true;
                covers_product_head |= idx == 0;
            }
        }
        if hit {
            matched.push(token);
        }
    }

    if matched.is_empty() {
        return None;
    }
    let covers_ingredient_head = ingredient
        .first_token()
        .is_some_and(|head| matched.contains(&head));
    if !covers_ingredient_head && !covers_product_head {
        return None;
    }

    let confidence = partial_confidence(matched.len(), ingredient_tokens.len());
    Some(Verdict::new(
        MatchType::Partial,
        confidence,
        format!(
            "{} of {} ingredient tokens matched ({})",
            matched.len(),
            ingredient_tokens.len(),
            matched.join(", ")
        ),
    ))
}

fn token_matches(ingredient_token: &str, product_token: &str) -> bool {
    ingredient_token == product_token
        || (ingredient_token.chars().count() >= MIN_SUBSTRING_LEN
            && product_token.contains(ingredient_token))
}
