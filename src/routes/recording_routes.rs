use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    MessageResponse, RouteSummaryResponse, SaveRouteRequest, SaveRouteResponse, SaveStepRequest,
    StartRouteRequest, StartRouteResponse, StopRouteRequest, StopRouteResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiPath, OptionalJson, ValidatedJson};

/// Rutas del grabador de administración
pub fn create_recording_router() -> Router<AppState> {
    Router::new()
        .route("/admin/route/start", post(start_route))
        .route("/admin/route/step", post(save_step))
        .route("/admin/route/stop", post(stop_route))
        .route("/admin/route/save", post(save_route))
        .route("/admin/routes/:place_id", get(list_routes))
}

fn controller(state: &AppState) -> RouteController {
    RouteController::new(state.pool.clone(), state.route_locks.clone())
}

async fn start_route(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StartRouteRequest>,
) -> Result<Json<StartRouteResponse>, AppError> {
    let response = controller(&state).begin_route(request).await?;
    Ok(Json(response))
}

async fn save_step(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveStepRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = controller(&state).append_step(request).await?;
    Ok(Json(response))
}

// Los clientes antiguos no mandan cuerpo; si lo hay, puede traer el route_id
async fn stop_route(
    State(state): State<AppState>,
    OptionalJson(request): OptionalJson<StopRouteRequest>,
) -> Result<Json<StopRouteResponse>, AppError> {
    let request = request.unwrap_or_default();
    let response = controller(&state).finalize_route(request).await?;
    Ok(Json(response))
}

async fn save_route(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveRouteRequest>,
) -> Result<Json<SaveRouteResponse>, AppError> {
    let response = controller(&state).save_route(request).await?;
    Ok(Json(response))
}

async fn list_routes(
    State(state): State<AppState>,
    ApiPath(place_id): ApiPath<i64>,
) -> Result<Json<Vec<RouteSummaryResponse>>, AppError> {
    let response = controller(&state).list_routes_for_place(place_id).await?;
    Ok(Json(response))
}
