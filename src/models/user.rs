//! Modelo de User
//!
//! La contraseña sólo se guarda como hash bcrypt; el struct no es serializable
//! para que el hash nunca llegue a una respuesta.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
