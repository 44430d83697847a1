use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::{
    dto::{RecipeCreate, RecipeUpdate},
    repo_types::{NewRecipe, Recipe, RecipePatch},
};
use crate::{
    error::{ApiJson, ApiPath, AppError, AppResult},
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:id", put(update_recipe).delete(delete_recipe))
}

fn not_found(id: i64) -> AppError {
    warn!(recipe_id = id, "recipe not found");
    AppError::NotFound("Recipe not found".into())
}

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.list().await?))
}

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RecipeCreate>,
) -> AppResult<Json<Recipe>> {
    let new = NewRecipe::try_from(body)?;
    let recipe = state.recipes.create(new).await?;
    info!(recipe_id = recipe.id, "recipe created");
    Ok(Json(recipe))
}

#[instrument(skip(state, body))]
pub async fn update_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RecipeUpdate>,
) -> AppResult<Json<Recipe>> {
    let patch = RecipePatch::try_from(body)?;
    let recipe = state
        .recipes
        .update(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(recipe_id = id, "recipe updated");
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Value>> {
    if !state.recipes.delete(id).await? {
        return Err(not_found(id));
    }
    info!(recipe_id = id, "recipe deleted");
    Ok(Json(json!({ "ok": true })))
}
