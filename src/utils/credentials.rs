//! Utilidades de credenciales
//!
//! Hash de contraseñas de usuario con bcrypt y comparación en tiempo
//! constante para la credencial de administrador inyectada por configuración.

use bcrypt::{hash, verify};
use sha2::{Digest, Sha256};

use crate::utils::errors::AppError;

/// Generar el hash salado de una contraseña
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
}

/// Verificar una contraseña contra su hash almacenado
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash)
        .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))
}

/// Comparación en tiempo constante.
///
/// Ambos lados se reducen primero a un digest SHA-256, así la duración no
/// depende ni del prefijo común ni de la longitud de las entradas.
pub fn constant_time_eq(left: &str, right: &str) -> bool {
    let left = Sha256::digest(left.as_bytes());
    let right = Sha256::digest(right.as_bytes());

    left.iter()
        .zip(right.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
