use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pantry_match::{AvailabilityReport, InventoryProduct, MatchesByIngredient, RecipeIngredient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Recipe availability request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeAvailabilityRequest {
    /// Recipe ingredient lines; required, may be empty
    #[serde(default)]
    pub ingredients: Option<Vec<RecipeIngredient>>,

    #[serde(default)]
    pub inventory_products: Vec<InventoryProduct>,

    #[serde(default)]
    pub household_id: Option<String>,
}

/// Recipe availability response
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeAvailabilityResponse {
    pub report: AvailabilityReport,
    pub matches: MatchesByIngredient,
}

/// Classify every ingredient of a recipe and aggregate the result.
pub async fn check_recipe(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<RecipeAvailabilityRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload
        .map_err(|rejection| ServerError::from_json_rejection(rejection, state.config.max_body_size_mb))?;

    let ingredients = request
        .ingredients
        .ok_or_else(|| ServerError::BadRequest("Recipe ingredients are required".to_string()))?;

    let matcher = state.engine.matcher();
    let inventory = request.inventory_products;
    let household_id = request.household_id;

    let (matches, report) = tokio::task::spawn_blocking(move || {
        matcher.check_recipe(&ingredients, &inventory, household_id.as_deref())
    })
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "recipe availability task failed");
        ServerError::Internal("Failed to check recipe availability".to_string())
    })?;

    Ok(Json(RecipeAvailabilityResponse { report, matches }))
}
