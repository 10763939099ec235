use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pantry_match::{IngredientMatch, InventoryProduct, RecipeIngredient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Match request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchIngredientsRequest {
    /// Free-text ingredient name from the recipe; required and non-empty
    #[serde(default)]
    pub ingredient_name: Option<String>,

    /// Household inventory snapshot to match against
    #[serde(default)]
    pub inventory_products: Vec<InventoryProduct>,

    /// Scopes taxonomy overrides to one household
    #[serde(default)]
    pub household_id: Option<String>,
}

/// Match response
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchIngredientsResponse {
    pub matches: Vec<IngredientMatch>,
}

/// Rank the inventory products that can satisfy one recipe ingredient.
///
/// Classification is CPU-bound, so it runs on the blocking pool against the
/// taxonomy snapshot current when the request arrived.
pub async fn match_ingredients(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<MatchIngredientsRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload
        .map_err(|rejection| ServerError::from_json_rejection(rejection, state.config.max_body_size_mb))?;

    let ingredient_name = request
        .ingredient_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Ingredient name is required".to_string()))?;

    let matcher = state.engine.matcher();
    let inventory = request.inventory_products;
    let household_id = request.household_id;

    let matches = tokio::task::spawn_blocking(move || {
        matcher.classify(
            &RecipeIngredient::new(ingredient_name),
            &inventory,
            household_id.as_deref(),
        )
    })
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "ingredient matching task failed");
        ServerError::Internal("Failed to match ingredients".to_string())
    })?;

    Ok(Json(MatchIngredientsResponse { matches }))
}
