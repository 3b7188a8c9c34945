//! Modelo de Location
//!
//! Una ubicación con nombre dentro de un lugar, en una planta concreta.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Location principal - mapea exactamente a la tabla locations
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: i64,
    pub place_id: i64,
    pub name: String,
    pub floor: String,
    pub created_at: DateTime<Utc>,
}
