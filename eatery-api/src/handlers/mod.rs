pub mod dish;
pub mod restaurant;

// Re-export routers for easier importing
pub use dish::router as dish_router;
pub use restaurant::router as restaurant_router;

use eatery_store::CatalogStore;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::list_restaurants_by_cuisine,
        restaurant::filter_restaurants,
        restaurant::list_restaurants_by_rating,
        dish::list_dishes,
        dish::get_dish,
        dish::filter_dishes,
        dish::list_dishes_by_price,
    ),
    components(
        schemas(
            crate::models::Restaurant,
            crate::models::Dish,
            crate::models::ListRestaurantsResponse,
            crate::models::RestaurantDetailResponse,
            crate::models::ListDishesResponse,
            crate::models::DishDetailResponse,
            crate::models::NotFoundResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant catalog endpoints"),
        (name = "dishes", description = "Dish catalog endpoints")
    ),
    info(
        title = "Eatery API",
        description = "Read-only catalog of restaurants and dishes",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
