//! Modelo de Place
//!
//! Un lugar (edificio, centro comercial...) es la raíz del espacio de nombres
//! de ubicaciones y rutas.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Place principal - mapea exactamente a la tabla places
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
