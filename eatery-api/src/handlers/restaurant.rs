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
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/details/{id}", get(get_restaurant))
        .route(
            "/restaurants/cuisine/{cuisine}",
            get(list_restaurants_by_cuisine),
        )
        .route("/restaurants/filter", get(filter_restaurants))
        .route("/restaurants/sort-by-rating", get(list_restaurants_by_rating))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = ListRestaurantsResponse),
        (status = 404, description = "No restaurants exist", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let rows = state
        .store
        .list_restaurants()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No restaurants found".to_string()));
    }

    Ok(Json(ListRestaurantsResponse {
        restaurants: rows.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurants/details/{id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetailResponse),
        (status = 404, description = "No restaurant with this id", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetailResponse>, ApiError> {
    let row = state
        .store
        .restaurant_by_id(id)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("No restaurants found of this id: {id} ")))?;

    Ok(Json(RestaurantDetailResponse {
        restaurants: row.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurants/cuisine/{cuisine}",
    responses(
        (status = 200, description = "Restaurants serving the cuisine", body = ListRestaurantsResponse),
        (status = 404, description = "No restaurants serve this cuisine", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    params(
        ("cuisine" = String, Path, description = "Cuisine name, matched exactly")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants_by_cuisine(
    State(state): State<AppState>,
    Path(cuisine): Path<String>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let rows = state
        .store
        .restaurants_by_cuisine(&cuisine)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No restaurants found of this: {cuisine} "
        )));
    }

    Ok(Json(ListRestaurantsResponse {
        restaurants: rows.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurants/filter",
    responses(
        (status = 200, description = "Restaurants matching all three flags", body = ListRestaurantsResponse),
        (status = 404, description = "No restaurants match", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    params(RestaurantFilterQuery),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn filter_restaurants(
    State(state): State<AppState>,
    Query(filter): Query<RestaurantFilterQuery>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let rows = state
        .store
        .restaurants_by_flags(filter.is_veg, filter.has_outdoor_seating, filter.is_luxury)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No restaurants found".to_string()));
    }

    Ok(Json(ListRestaurantsResponse {
        restaurants: rows.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurants/sort-by-rating",
    responses(
        (status = 200, description = "All restaurants, highest rating first", body = ListRestaurantsResponse),
        (status = 404, description = "No restaurants exist", body = NotFoundResponse),
        (status = 500, description = "Query failed", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants_by_rating(
    State(state): State<AppState>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let rows = state
        .store
        .restaurants_by_rating()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No restaurants found ".to_string()));
    }

    Ok(Json(ListRestaurantsResponse {
        restaurants: rows.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use diesel::connection::SimpleConnection;
    use diesel::{Connection, SqliteConnection};
    use eatery_store::CatalogStore;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    const SCHEMA: &str = "
        CREATE TABLE restaurants (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            cuisine TEXT NOT NULL,
            rating REAL NOT NULL,
            isVeg BOOLEAN NOT NULL,
            hasOutdoorSeating BOOLEAN NOT NULL,
            isLuxury BOOLEAN NOT NULL
        );
    ";

    const SEED: &str = "
        INSERT INTO restaurants VALUES
            (1, 'Spice Garden', 'Indian', 4.3, 1, 1, 0),
            (2, 'Trattoria Roma', 'Italian', 4.7, 0, 1, 1),
            (3, 'Green Bowl', 'Italian', 3.9, 1, 0, 0);
    ";

    fn test_app(sql: &[&str]) -> Router {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        for statement in sql {
            conn.batch_execute(statement).unwrap();
        }
        let state = AppState {
            store: CatalogStore::new(conn),
        };
        Router::new().merge(router()).with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn listing_returns_every_row_in_camel_case() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(app, "/restaurants").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["restaurants"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["isVeg"], Value::Bool(true));
        assert_eq!(rows[0]["hasOutdoorSeating"], Value::Bool(true));
        assert_eq!(rows[0]["isLuxury"], Value::Bool(false));
    }

    #[tokio::test]
    async fn listing_an_empty_table_is_not_found() {
        let app = test_app(&[SCHEMA]);
        let (status, body) = get_json(app, "/restaurants").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No restaurants found");
    }

    #[tokio::test]
    async fn detail_wraps_a_single_object_under_the_collection_key() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(app, "/restaurants/details/1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["restaurants"]["id"], 1);
        assert_eq!(body["restaurants"]["name"], "Spice Garden");
        assert!(body["restaurants"].is_object());
    }

    #[tokio::test]
    async fn detail_for_absent_id_is_not_found() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(app, "/restaurants/details/999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No restaurants found of this id: 999 ");
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_before_the_query() {
        let app = test_app(&[SCHEMA, SEED]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/restaurants/details/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cuisine_lookup_returns_only_matching_rows() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(app, "/restaurants/cuisine/Italian").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["restaurants"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["cuisine"] == "Italian"));
    }

    #[tokio::test]
    async fn unknown_cuisine_is_not_found() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(app, "/restaurants/cuisine/Nordic").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No restaurants found of this: Nordic ");
    }

    #[tokio::test]
    async fn flag_filter_matches_all_three_flags_at_once() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(
            app,
            "/restaurants/filter?isVeg=true&hasOutdoorSeating=true&isLuxury=false",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["restaurants"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], 1);
    }

    #[tokio::test]
    async fn flag_combination_without_matches_is_not_found() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(
            app,
            "/restaurants/filter?isVeg=true&hasOutdoorSeating=true&isLuxury=true",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No restaurants found");
    }

    #[tokio::test]
    async fn malformed_flag_value_is_rejected() {
        let app = test_app(&[SCHEMA, SEED]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/restaurants/filter?isVeg=yes&hasOutdoorSeating=true&isLuxury=false")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sort_by_rating_is_non_increasing() {
        let app = test_app(&[SCHEMA, SEED]);
        let (status, body) = get_json(app, "/restaurants/sort-by-rating").await;

        assert_eq!(status, StatusCode::OK);
        let ratings: Vec<f64> = body["restaurants"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["rating"].as_f64().unwrap())
            .collect();
        assert!(ratings.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[tokio::test]
    async fn sort_by_rating_on_empty_table_is_not_found() {
        let app = test_app(&[SCHEMA]);
        let (status, body) = get_json(app, "/restaurants/sort-by-rating").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No restaurants found ");
    }

    #[tokio::test]
    async fn query_failure_is_an_internal_error() {
        // No schema at all, so every query fails.
        let app = test_app(&[]);
        let (status, body) = get_json(app, "/restaurants").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("restaurants"));
    }
}
