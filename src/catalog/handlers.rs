use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::FoodItem;
use crate::{
    errors::{AppError, AppResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(search_foods))
        .route("/foods/:id", get(get_food))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<FoodItem>> {
    let found: Vec<FoodItem> = state.catalog.search(&query.q).into_iter().cloned().collect();
    debug!(term = %query.q, matches = found.len(), "food search");
    Json(found)
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoodItem>> {
    match state.catalog.get(id) {
        Some(food) => Ok(Json(food.clone())),
        None => {
            warn!(id, "unknown food id");
            Err(AppError::NotFound(format!("food {id}")))
        }
    }
}
