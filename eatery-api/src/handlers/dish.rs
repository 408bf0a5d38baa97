use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dishes", get(list_dishes))
        .route("/dishes/details/{id}", get(get_dish))
        .route("/dishes/filter", get(filter_dishes))
        .route("/dishes/sort-by-price", get(list_dishes_by_price))
}

#[utoipa::path(
    get,
    path = "/dishes",
    responses(
        (status = 200, description = "All dishes", body = ListDishesResponse),
        (status = 404, description = "No dishes exist", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn list_dishes(
    State(state): State<AppState>,
) -> Result<Json<ListDishesResponse>, ApiError> {
    let rows = state
        .store
        .list_dishes()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No dishes found ".to_string()));
    }

    Ok(Json(ListDishesResponse {
        dishes: rows.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/dishes/details/{id}",
    responses(
        (status = 200, description = "Dish details", body = DishDetailResponse),
        (status = 404, description = "No dish with this id", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Dish id")
    ),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DishDetailResponse>, ApiError> {
    let row = state
        .store
        .dish_by_id(id)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("No dishes found of this {id} ")))?;

    Ok(Json(DishDetailResponse { dishes: row.into() }))
}

#[utoipa::path(
    get,
    path = "/dishes/filter",
    responses(
        (status = 200, description = "Dishes matching the flag", body = ListDishesResponse),
        (status = 404, description = "No dishes match", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    params(DishFilterQuery),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn filter_dishes(
    State(state): State<AppState>,
    Query(filter): Query<DishFilterQuery>,
) -> Result<Json<ListDishesResponse>, ApiError> {
    let rows = state
        .store
        .dishes_by_veg(filter.is_veg)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No dishes found ".to_string()));
    }

    Ok(Json(ListDishesResponse {
        dishes: rows.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/dishes/sort-by-price",
    responses(
        (status = 200, description = "All dishes, cheapest first", body = ListDishesResponse),
        (status = 404, description = "No dishes exist", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn list_dishes_by_price(
    State(state): State<AppState>,
) -> Result<Json<ListDishesResponse>, ApiError> {
    let rows = state
        .store
        .dishes_by_price()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No dishes found ".to_string()));
    }

    Ok(Json(ListDishesResponse {
        dishes: rows.into_iter().map(Into::into).collect(),
    }))
}
