use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Cuisine served (e.g. "Italian")
    pub cuisine: String,
    /// Average rating
    pub rating: f64,
    /// Serves only vegetarian food
    pub is_veg: bool,
    /// Has outdoor seating
    pub has_outdoor_seating: bool,
    /// Counts as a luxury venue
    pub is_luxury: bool,
}

impl From<eatery_store::models::Restaurant> for Restaurant {
    fn from(row: eatery_store::models::Restaurant) -> Self {
        Self {
            id: row.id,
            name: row.name,
            cuisine: row.cuisine,
            rating: row.rating,
            is_veg: row.is_veg,
            has_outdoor_seating: row.has_outdoor_seating,
            is_luxury: row.is_luxury,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Unique identifier for the dish
    pub id: i32,
    /// Name of the dish
    pub name: String,
    /// Price of the dish
    pub price: f64,
    /// Dish is vegetarian
    pub is_veg: bool,
}

impl From<eatery_store::models::Dish> for Dish {
    fn from(row: eatery_store::models::Dish) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            is_veg: row.is_veg,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

/// Detail lookups keep the collection key, wrapping a single object.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetailResponse {
    pub restaurants: Restaurant,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListDishesResponse {
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DishDetailResponse {
    pub dishes: Dish,
}

/// Accepted flag representation is the literal `true` / `false`;
/// anything else is rejected before the query runs.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RestaurantFilterQuery {
    pub is_veg: bool,
    pub has_outdoor_seating: bool,
    pub is_luxury: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DishFilterQuery {
    pub is_veg: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundResponse {
    /// Human-readable description of the missing resource
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
