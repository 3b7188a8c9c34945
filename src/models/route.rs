//! Modelo de Route
//!
//! Una ruta grabada va de una ubicación a otra dentro de un lugar y es
//! dirigida: A→B y B→A son registros distintos. Las dos representaciones
//! (instrucciones paso a paso o trazo de coordenadas) comparten la tabla
//! `routes` y se distinguen por `kind`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Planta por defecto cuando el grabador no indica ninguna
pub const DEFAULT_FLOOR: &str = "Ground";

/// Tipo de ruta - mapea a la columna `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Stepwise,
    Path,
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Route {
    pub id: i64,
    pub kind: RouteKind,
    pub place_id: i64,
    pub from_location_id: i64,
    pub to_location_id: i64,
    pub floor: String,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Cabecera de una ruta nueva, común a ambos protocolos de grabación
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub place_id: i64,
    pub from_location_id: i64,
    pub to_location_id: i64,
    pub floor: String,
    pub location_name: Option<String>,
}

/// Una instrucción de navegación
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RouteStep {
    pub step_order: i64,
    pub action: String,
    pub distance: f64,
}

/// Un punto del trazo, en el sistema de coordenadas del cliente
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Contenido de una ruta según su tipo
#[derive(Debug, Clone, PartialEq)]
pub enum RouteBody {
    Stepwise(Vec<RouteStep>),
    Path(Vec<PathPoint>),
}
