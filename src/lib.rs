//! Backend de navegación en interiores
//!
//! Los operadores registran lugares, ubicaciones y rutas grabadas entre
//! ubicaciones; los usuarios piden la ruta de A a B dentro de un lugar y
//! reciben las instrucciones o el trazo para pintarlo en el mapa.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_middleware;
use state::AppState;

/// Router completo de la API con CORS y trazas
pub fn build_router(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .merge(routes::auth_routes::create_auth_router())
        .merge(routes::place_routes::create_place_router())
        .merge(routes::recording_routes::create_recording_router())
        .merge(routes::navigation_routes::create_navigation_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
