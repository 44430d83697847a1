use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::repo_types::PlanDocument;
use crate::{
    error::{ApiJson, AppResult},
    state::AppState,
};

pub fn meal_plan_routes() -> Router<AppState> {
    Router::new().route("/meal-plan", get(get_meal_plan).put(update_meal_plan))
}

#[instrument(skip(state))]
pub async fn get_meal_plan(State(state): State<AppState>) -> AppResult<Json<PlanDocument>> {
    let plan = state.meal_plan.get_or_create().await?;
    Ok(Json(plan.plan.0))
}

/// Body must be a JSON object; it becomes the whole plan.
#[instrument(skip(state, plan))]
pub async fn update_meal_plan(
    State(state): State<AppState>,
    ApiJson(plan): ApiJson<PlanDocument>,
) -> AppResult<Json<PlanDocument>> {
    let plan = state.meal_plan.replace(plan).await?;
    info!(keys = plan.plan.0.len(), updated_at = %plan.updated_at, "meal plan replaced");
    Ok(Json(plan.plan.0))
}
