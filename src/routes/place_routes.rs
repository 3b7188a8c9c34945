use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::place_controller::PlaceController;
use crate::dto::place_dto::{
    CreateLocationRequest, CreateLocationResponse, CreatePlaceRequest, LocationDetailResponse,
    LocationResponse, PlaceResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiPath, ValidatedJson};

pub fn create_place_router() -> Router<AppState> {
    Router::new()
        .route("/admin/place", post(create_place))
        .route("/places", get(list_places))
        .route("/admin/location", post(create_location))
        .route("/locations", get(list_locations))
        .route("/locations/:place_id", get(list_locations_by_place))
}

async fn create_place(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePlaceRequest>,
) -> Result<Json<PlaceResponse>, AppError> {
    let controller = PlaceController::new(state.pool.clone());
    let response = controller.create_place(request).await?;
    Ok(Json(response))
}

async fn list_places(State(state): State<AppState>) -> Result<Json<Vec<PlaceResponse>>, AppError> {
    let controller = PlaceController::new(state.pool.clone());
    let response = controller.list_places().await?;
    Ok(Json(response))
}

async fn create_location(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateLocationRequest>,
) -> Result<Json<CreateLocationResponse>, AppError> {
    let controller = PlaceController::new(state.pool.clone());
    let response = controller.create_location(request).await?;
    Ok(Json(response))
}

async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationDetailResponse>>, AppError> {
    let controller = PlaceController::new(state.pool.clone());
    let response = controller.list_locations().await?;
    Ok(Json(response))
}

async fn list_locations_by_place(
    State(state): State<AppState>,
    ApiPath(place_id): ApiPath<i64>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let controller = PlaceController::new(state.pool.clone());
    let response = controller.list_locations_by_place(place_id).await?;
    Ok(Json(response))
}
