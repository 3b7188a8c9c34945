use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::navigation_controller::NavigationController;
use crate::dto::route_dto::{NavigateQuery, PathNavigationResponse, StepResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiQuery;

pub fn create_navigation_router() -> Router<AppState> {
    Router::new()
        .route("/navigate", get(navigate))
        .route("/navigate/map", get(navigate_map))
}

async fn navigate(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NavigateQuery>,
) -> Result<Json<Vec<StepResponse>>, AppError> {
    let controller = NavigationController::new(state.pool.clone());
    let response = controller.resolve_stepwise(query).await?;
    Ok(Json(response))
}

async fn navigate_map(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NavigateQuery>,
) -> Result<Json<PathNavigationResponse>, AppError> {
    let controller = NavigationController::new(state.pool.clone());
    let response = controller.resolve_path(query).await?;
    Ok(Json(response))
}
