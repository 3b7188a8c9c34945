use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{PathPoint, Route, RouteStep};

// Punto enviado por el grabador; ambas coordenadas son obligatorias pero se
// validan en el controlador para responder con un mensaje preciso
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PathPointInput {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

// Request para guardar una ruta de trazo completa
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRouteRequest {
    pub place_id: Option<i64>,
    pub from_id: Option<i64>,
    pub to_id: Option<i64>,
    #[validate(length(min = 1, max = 50))]
    pub floor: Option<String>,
    #[validate(length(max = 100))]
    pub location_name: Option<String>,
    pub path: Option<Vec<PathPointInput>>,
}

// Response al guardar una ruta de trazo
#[derive(Debug, Serialize)]
pub struct SaveRouteResponse {
    pub route_id: i64,
    pub message: String,
}

// Request para iniciar una grabación paso a paso
#[derive(Debug, Deserialize, Validate)]
pub struct StartRouteRequest {
    pub place_id: i64,
    pub from_id: i64,
    pub to_id: i64,
    #[validate(length(min = 1, max = 50))]
    pub floor: Option<String>,
}

// Response al iniciar una grabación
#[derive(Debug, Serialize)]
pub struct StartRouteResponse {
    pub route_id: i64,
}

// Request para guardar un paso
#[derive(Debug, Deserialize, Validate)]
pub struct SaveStepRequest {
    pub route_id: i64,
    pub order: i64,
    #[validate(length(min = 1, max = 50))]
    pub action: String,
    pub distance: f64,
}

// Request para cerrar una grabación; el cuerpo es opcional
#[derive(Debug, Default, Deserialize)]
pub struct StopRouteRequest {
    pub route_id: Option<i64>,
}

// Response al cerrar una grabación
#[derive(Debug, Serialize)]
pub struct StopRouteResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

// Response genérica con mensaje
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Resumen de una ruta de trazo para el listado de administración
#[derive(Debug, Serialize)]
pub struct RouteSummaryResponse {
    pub route_id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub floor: String,
    pub location_name: Option<String>,
}

impl From<Route> for RouteSummaryResponse {
    fn from(route: Route) -> Self {
        Self {
            route_id: route.id,
            from_id: route.from_location_id,
            to_id: route.to_location_id,
            floor: route.floor,
            location_name: route.location_name,
        }
    }
}

// Query de navegación: /navigate?place_id=..&from=..&to=..
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NavigateQuery {
    pub place_id: i64,
    pub from: i64,
    pub to: i64,
}

// Instrucción devuelta al usuario
#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub action: String,
    pub distance: f64,
}

impl From<RouteStep> for StepResponse {
    fn from(step: RouteStep) -> Self {
        Self {
            action: step.action,
            distance: step.distance,
        }
    }
}

// Ruta de trazo resuelta para pintar en el mapa
#[derive(Debug, Serialize)]
pub struct PathNavigationResponse {
    pub route_id: i64,
    pub floor: String,
    pub location_name: Option<String>,
    pub from_name: String,
    pub to_name: String,
    pub path: Vec<PathPoint>,
}
