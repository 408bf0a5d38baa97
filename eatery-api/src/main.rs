use axum::Router;
use dotenvy::dotenv;
use eatery_store::{CatalogStore, establish_connection};
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod handlers;
mod models;

use handlers::{ApiDoc, AppState, dish_router, restaurant_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    // The store must be ready before the listener accepts connections.
    let store = CatalogStore::new(establish_connection());
    let state = AppState { store };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000);

    let app = Router::new()
        .merge(restaurant_router())
        .merge(dish_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Eatery API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
