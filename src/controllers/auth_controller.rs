use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::environment::AdminCredentials;
use crate::dto::auth_dto::{
    AdminLoginResponse, LoginRequest, SignupRequest, SignupResponse, UserLoginResponse,
};
use crate::repositories::user_repository::UserRepository;
use crate::utils::credentials::{hash_password, verify_password};
use crate::utils::errors::{bad_request_error, conflict_error, AppError};

/// Registro y login de usuarios, más el login del operador
pub struct AuthController {
    users: UserRepository,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self {
            users: UserRepository::new(pool),
            bcrypt_cost,
        }
    }

    pub fn admin_login(
        &self,
        admin: &AdminCredentials,
        request: &LoginRequest,
    ) -> Result<AdminLoginResponse, AppError> {
        if admin.matches(&request.email, &request.password) {
            info!("🔑 Login de administrador correcto");
            Ok(AdminLoginResponse::admin())
        } else {
            warn!("Intento de login de administrador fallido");
            Err(AppError::Unauthorized("Invalid admin".to_string()))
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, AppError> {
        let email = request.email.trim();
        if request.name.trim().is_empty() || email.is_empty() {
            return Err(bad_request_error("Name, email and password are required"));
        }

        if self.users.email_exists(email).await? {
            return Err(conflict_error("User", "email", email));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = self
            .users
            .create(request.name.trim(), email, &password_hash)
            .await?;
        info!("👤 Usuario registrado: {}", user.id);

        Ok(SignupResponse {
            message: "User created".to_string(),
            user_id: user.id,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<UserLoginResponse, AppError> {
        let user = self
            .users
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid login".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid login".to_string()));
        }

        Ok(UserLoginResponse { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;

    // bcrypt acepta 4 como coste mínimo; suficiente para tests
    const TEST_COST: u32 = 4;

    async fn controller() -> AuthController {
        AuthController::new(connect_in_memory().await.unwrap(), TEST_COST)
    }

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login_returns_same_user() {
        let controller = controller().await;
        let created = controller.signup(signup("ana@example.com")).await.unwrap();

        let logged = controller
            .login(login("ana@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(logged.user_id, created.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let controller = controller().await;
        controller.signup(signup("ana@example.com")).await.unwrap();

        let result = controller.signup(signup("ana@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let controller = controller().await;
        controller.signup(signup("ana@example.com")).await.unwrap();

        let wrong_password = controller.login(login("ana@example.com", "nope")).await;
        assert!(matches!(wrong_password, Err(AppError::Unauthorized(_))));

        let unknown = controller.login(login("bob@example.com", "correct horse")).await;
        assert!(matches!(unknown, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_admin_login_uses_injected_credentials() {
        let controller = controller().await;
        let admin = AdminCredentials::new("operator", "s3cret");

        let ok = controller.admin_login(&admin, &login("operator", "s3cret")).unwrap();
        assert_eq!(ok.role, "admin");

        let denied = controller.admin_login(&admin, &login("operator", "S3cret"));
        assert!(matches!(denied, Err(AppError::Unauthorized(_))));
    }
}
