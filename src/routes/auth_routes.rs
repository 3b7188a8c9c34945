use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AdminLoginResponse, LoginRequest, SignupRequest, SignupResponse, UserLoginResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin_login))
        .route("/user/signup", post(user_signup))
        .route("/user/login", post(user_login))
}

async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.bcrypt_cost);
    let response = controller.admin_login(&state.config.admin, &request)?;
    Ok(Json(response))
}

async fn user_signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.bcrypt_cost);
    let response = controller.signup(request).await?;
    Ok(Json(response))
}

async fn user_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<UserLoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.bcrypt_cost);
    let response = controller.login(request).await?;
    Ok(Json(response))
}
