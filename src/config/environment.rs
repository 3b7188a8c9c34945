//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! La credencial de administrador se inyecta aquí, nunca como constante en el código.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::utils::credentials::constant_time_eq;

/// Errores al leer la configuración del proceso
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Credencial única del operador
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Comparar contra la credencial configurada en tiempo constante
    pub fn matches(&self, email: &str, password: &str) -> bool {
        // `&` y no `&&`: siempre se evalúan ambas comparaciones
        constant_time_eq(&self.email, email) & constant_time_eq(&self.password, password)
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub admin: AdminCredentials,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_var("PORT", 5000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            admin: AdminCredentials::new(
                env::var("ADMIN_EMAIL").map_err(|_| ConfigError::Missing("ADMIN_EMAIL"))?,
                env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::Missing("ADMIN_PASSWORD"))?,
            ),
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}

/// Lista separada por comas; `*` equivale a cualquier origen
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "*")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_credentials_match() {
        let admin = AdminCredentials::new("operator", "hunter22");
        assert!(admin.matches("operator", "hunter22"));
        assert!(!admin.matches("operator", "hunter2"));
        assert!(!admin.matches("Operator", "hunter22"));
    }

    #[test]
    fn test_debug_hides_password() {
        let admin = AdminCredentials::new("operator", "hunter22");
        let rendered = format!("{:?}", admin);
        assert!(rendered.contains("operator"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins("*").is_empty());
        assert!(parse_origins("").is_empty());
        assert_eq!(
            parse_origins("http://a.test, http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
