use serde::{Deserialize, Serialize};
use validator::Validate;

// Login request (admin y usuario comparten el mismo cuerpo)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 120))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Request de registro de usuario
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub password: String,
}

// Response de login de administrador
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub role: String,
}

impl AdminLoginResponse {
    pub fn admin() -> Self {
        Self {
            role: "admin".to_string(),
        }
    }
}

// Response de registro
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i64,
}

// Response de login de usuario
#[derive(Debug, Serialize)]
pub struct UserLoginResponse {
    pub user_id: i64,
}
