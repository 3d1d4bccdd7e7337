use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::Product, routes::AppState};

/// Handler listing the loaded catalog
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.recommender.catalog().products().to_vec())
}
