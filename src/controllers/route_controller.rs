//! Grabación de rutas
//!
//! Dos protocolos de escritura sobre la misma tabla `routes`:
//!
//! * paso a paso: `begin_route` crea la cabecera, cada `append_step` se
//!   confirma por separado y `finalize_route` no cambia nada. Una grabación
//!   interrumpida deja una ruta parcial, que se resuelve como lista vacía o corta.
//! * trazo: `save_route` valida el trazo completo y escribe cabecera y puntos
//!   en una única transacción.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::dto::route_dto::{
    MessageResponse, PathPointInput, RouteSummaryResponse, SaveRouteRequest, SaveRouteResponse,
    SaveStepRequest, StartRouteRequest, StartRouteResponse, StopRouteRequest, StopRouteResponse,
};
use crate::models::route::{NewRoute, DEFAULT_FLOOR};
use crate::models::{PathPoint, Route, RouteKind};
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::place_repository::PlaceRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::state::RouteWriteLocks;
use crate::utils::errors::{bad_request_error, invalid_reference_error, AppError};

/// Un trazo necesita al menos origen y destino
pub const MIN_PATH_POINTS: usize = 2;

pub struct RouteController {
    routes: RouteRepository,
    places: PlaceRepository,
    locations: LocationRepository,
    locks: RouteWriteLocks,
}

impl RouteController {
    pub fn new(pool: SqlitePool, locks: RouteWriteLocks) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            places: PlaceRepository::new(pool.clone()),
            locations: LocationRepository::new(pool),
            locks,
        }
    }

    pub async fn begin_route(&self, request: StartRouteRequest) -> Result<StartRouteResponse, AppError> {
        self.check_endpoints(request.place_id, request.from_id, request.to_id)
            .await?;

        let header = NewRoute {
            place_id: request.place_id,
            from_location_id: request.from_id,
            to_location_id: request.to_id,
            floor: normalize_floor(request.floor),
            location_name: None,
        };
        let route = self.routes.create(RouteKind::Stepwise, &header).await?;
        info!(
            "🎬 Grabación iniciada: ruta {} ({} → {}) en lugar {}",
            route.id, route.from_location_id, route.to_location_id, route.place_id
        );

        Ok(StartRouteResponse { route_id: route.id })
    }

    pub async fn append_step(&self, request: SaveStepRequest) -> Result<MessageResponse, AppError> {
        if !request.distance.is_finite() || request.distance < 0.0 {
            return Err(bad_request_error("distance must be a non-negative number"));
        }
        let action = request.action.trim();
        if action.is_empty() {
            return Err(bad_request_error("action is required"));
        }

        // Las rutas no se borran: basta validarla antes de tomar el candado
        self.find_stepwise(request.route_id).await?;

        // El chequeo de orden duplicado y la inserción deben ser atómicos por ruta
        let _guard = self.locks.acquire(request.route_id).await;

        if self.routes.step_exists(request.route_id, request.order).await? {
            return Err(AppError::Conflict(format!(
                "Route {} already has a step with order {}",
                request.route_id, request.order
            )));
        }

        self.routes
            .append_step(request.route_id, request.order, action, request.distance)
            .await?;
        debug!(
            "👣 Paso {} guardado en ruta {}: {} {}m",
            request.order, request.route_id, action, request.distance
        );

        Ok(MessageResponse::new("Step saved"))
    }

    pub async fn finalize_route(&self, request: StopRouteRequest) -> Result<StopRouteResponse, AppError> {
        let Some(route_id) = request.route_id else {
            return Ok(StopRouteResponse {
                message: "Route completed".to_string(),
                route_id: None,
                steps: None,
            });
        };

        self.find_stepwise(route_id).await?;
        let steps = self.routes.steps_for(route_id).await?.len();
        info!("🏁 Grabación terminada: ruta {} con {} pasos", route_id, steps);

        Ok(StopRouteResponse {
            message: "Route completed".to_string(),
            route_id: Some(route_id),
            steps: Some(steps),
        })
    }

    pub async fn save_route(&self, request: SaveRouteRequest) -> Result<SaveRouteResponse, AppError> {
        let place_id = request
            .place_id
            .ok_or_else(|| bad_request_error("place_id is required"))?;
        let from_id = request
            .from_id
            .ok_or_else(|| bad_request_error("from_id is required"))?;
        let to_id = request.to_id.ok_or_else(|| bad_request_error("to_id is required"))?;

        // Nada se escribe hasta que el trazo completo es válido
        let points = validate_path(request.path.as_deref())?;

        self.check_endpoints(place_id, from_id, to_id).await?;

        let header = NewRoute {
            place_id,
            from_location_id: from_id,
            to_location_id: to_id,
            floor: normalize_floor(request.floor),
            location_name: request
                .location_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };
        let route = self.routes.create_path(&header, &points).await?;
        info!(
            "🗺️  Ruta de trazo {} guardada con {} puntos ({} → {})",
            route.id,
            points.len(),
            from_id,
            to_id
        );

        Ok(SaveRouteResponse {
            route_id: route.id,
            message: "Route saved".to_string(),
        })
    }

    pub async fn list_routes_for_place(&self, place_id: i64) -> Result<Vec<RouteSummaryResponse>, AppError> {
        let routes = self.routes.list_by_place(place_id, RouteKind::Path).await?;
        Ok(routes.into_iter().map(RouteSummaryResponse::from).collect())
    }

    async fn find_stepwise(&self, route_id: i64) -> Result<Route, AppError> {
        match self.routes.find_by_id(route_id).await? {
            Some(route) if route.kind == RouteKind::Stepwise => Ok(route),
            _ => Err(invalid_reference_error("Stepwise route", route_id)),
        }
    }

    /// El lugar debe existir y ambos extremos deben ser ubicaciones de ese lugar
    async fn check_endpoints(&self, place_id: i64, from_id: i64, to_id: i64) -> Result<(), AppError> {
        if self.places.find_by_id(place_id).await?.is_none() {
            return Err(invalid_reference_error("Place", place_id));
        }

        for location_id in [from_id, to_id] {
            let location = self
                .locations
                .find_by_id(location_id)
                .await?
                .ok_or_else(|| invalid_reference_error("Location", location_id))?;

            if location.place_id != place_id {
                return Err(AppError::InvalidReference(format!(
                    "Location {} does not belong to place {}",
                    location_id, place_id
                )));
            }
        }

        Ok(())
    }
}

/// Validar un trazo recibido: al menos dos puntos y ambas coordenadas en cada uno
pub fn validate_path(path: Option<&[PathPointInput]>) -> Result<Vec<PathPoint>, AppError> {
    let path = path.ok_or_else(|| bad_request_error("path is required"))?;

    if path.len() < MIN_PATH_POINTS {
        return Err(AppError::BadRequest(format!(
            "path must contain at least {} points, got {}",
            MIN_PATH_POINTS,
            path.len()
        )));
    }

    path.iter()
        .enumerate()
        .map(|(index, point)| match (point.x, point.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(PathPoint::new(x, y)),
            _ => Err(AppError::BadRequest(format!(
                "path point {} must have numeric x and y",
                index
            ))),
        })
        .collect()
}

fn normalize_floor(floor: Option<String>) -> String {
    floor
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FLOOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;
    use crate::repositories::route_repository::RouteRepository;

    struct Fixture {
        pool: SqlitePool,
        controller: RouteController,
        place: i64,
        a: i64,
        b: i64,
    }

    async fn fixture() -> Fixture {
        let pool = connect_in_memory().await.unwrap();
        let place = PlaceRepository::new(pool.clone()).create("Hospital").await.unwrap();
        let locations = LocationRepository::new(pool.clone());
        let a = locations.create(place.id, "Reception", "Ground").await.unwrap();
        let b = locations.create(place.id, "Radiology", "Second").await.unwrap();

        Fixture {
            controller: RouteController::new(pool.clone(), RouteWriteLocks::new()),
            pool,
            place: place.id,
            a: a.id,
            b: b.id,
        }
    }

    fn point(x: f64, y: f64) -> PathPointInput {
        PathPointInput {
            x: Some(x),
            y: Some(y),
        }
    }

    fn save_request(f: &Fixture, path: Vec<PathPointInput>) -> SaveRouteRequest {
        SaveRouteRequest {
            place_id: Some(f.place),
            from_id: Some(f.a),
            to_id: Some(f.b),
            floor: None,
            location_name: Some("  Radiology wing ".to_string()),
            path: Some(path),
        }
    }

    fn step(route_id: i64, order: i64, action: &str, distance: f64) -> SaveStepRequest {
        SaveStepRequest {
            route_id,
            order,
            action: action.to_string(),
            distance,
        }
    }

    async fn route_count(pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM routes")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[test]
    fn test_validate_path_rules() {
        assert!(validate_path(None).is_err());
        assert!(validate_path(Some(&[point(1.0, 1.0)][..])).is_err());

        let missing_y = [point(0.0, 0.0), PathPointInput { x: Some(1.0), y: None }];
        assert!(matches!(validate_path(Some(&missing_y[..])), Err(AppError::BadRequest(_))));

        let ok = validate_path(Some(&[point(0.0, 0.0), point(10.0, 20.0)][..])).unwrap();
        assert_eq!(ok, vec![PathPoint::new(0.0, 0.0), PathPoint::new(10.0, 20.0)]);
    }

    #[tokio::test]
    async fn test_save_route_defaults_floor_and_trims_label() {
        let f = fixture().await;
        let saved = f
            .controller
            .save_route(save_request(&f, vec![point(0.0, 0.0), point(10.0, 20.0)]))
            .await
            .unwrap();

        let listed = f.controller.list_routes_for_place(f.place).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].route_id, saved.route_id);
        assert_eq!(listed[0].floor, "Ground");
        assert_eq!(listed[0].location_name.as_deref(), Some("Radiology wing"));
    }

    #[tokio::test]
    async fn test_short_path_persists_nothing() {
        let f = fixture().await;
        let result = f.controller.save_route(save_request(&f, vec![point(0.0, 0.0)])).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(route_count(&f.pool).await, 0);
    }

    #[tokio::test]
    async fn test_save_route_requires_ids() {
        let f = fixture().await;
        let mut request = save_request(&f, vec![point(0.0, 0.0), point(1.0, 1.0)]);
        request.from_id = None;

        let result = f.controller.save_route(request).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(route_count(&f.pool).await, 0);
    }

    #[tokio::test]
    async fn test_endpoints_must_belong_to_place() {
        let f = fixture().await;
        let other = PlaceRepository::new(f.pool.clone()).create("Other").await.unwrap();
        let foreign = LocationRepository::new(f.pool.clone())
            .create(other.id, "Lobby", "Ground")
            .await
            .unwrap();

        let result = f
            .controller
            .begin_route(StartRouteRequest {
                place_id: f.place,
                from_id: f.a,
                to_id: foreign.id,
                floor: Some("Ground".to_string()),
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidReference(_))));

        let unknown = f
            .controller
            .begin_route(StartRouteRequest {
                place_id: f.place,
                from_id: f.a,
                to_id: 404,
                floor: None,
            })
            .await;
        assert!(matches!(unknown, Err(AppError::InvalidReference(_))));
        assert_eq!(route_count(&f.pool).await, 0);
    }

    #[tokio::test]
    async fn test_stepwise_recording_session() {
        let f = fixture().await;
        let started = f
            .controller
            .begin_route(StartRouteRequest {
                place_id: f.place,
                from_id: f.a,
                to_id: f.b,
                floor: Some("Ground".to_string()),
            })
            .await
            .unwrap();

        f.controller.append_step(step(started.route_id, 1, "left", 2.0)).await.unwrap();
        f.controller.append_step(step(started.route_id, 0, "walk", 5.0)).await.unwrap();

        let stopped = f
            .controller
            .finalize_route(StopRouteRequest {
                route_id: Some(started.route_id),
            })
            .await
            .unwrap();
        assert_eq!(stopped.steps, Some(2));

        let steps = RouteRepository::new(f.pool.clone())
            .steps_for(started.route_id)
            .await
            .unwrap();
        assert_eq!(steps[0].action, "walk");
        assert_eq!(steps[1].action, "left");
    }

    #[tokio::test]
    async fn test_append_step_rejections() {
        let f = fixture().await;
        let started = f
            .controller
            .begin_route(StartRouteRequest {
                place_id: f.place,
                from_id: f.a,
                to_id: f.b,
                floor: None,
            })
            .await
            .unwrap();

        let negative = f.controller.append_step(step(started.route_id, 0, "walk", -1.0)).await;
        assert!(matches!(negative, Err(AppError::BadRequest(_))));

        let unknown = f.controller.append_step(step(999, 0, "walk", 1.0)).await;
        assert!(matches!(unknown, Err(AppError::InvalidReference(_))));

        f.controller.append_step(step(started.route_id, 0, "walk", 1.0)).await.unwrap();
        let duplicate = f.controller.append_step(step(started.route_id, 0, "right", 1.0)).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_write_locks_are_released_after_appends() {
        let f = fixture().await;
        let started = f
            .controller
            .begin_route(StartRouteRequest {
                place_id: f.place,
                from_id: f.a,
                to_id: f.b,
                floor: None,
            })
            .await
            .unwrap();

        for order in 0..3 {
            f.controller.append_step(step(started.route_id, order, "walk", 1.0)).await.unwrap();
        }
        for route_id in 1000..1050 {
            let result = f.controller.append_step(step(route_id, 0, "walk", 1.0)).await;
            assert!(matches!(result, Err(AppError::InvalidReference(_))));
        }

        assert_eq!(f.controller.locks.tracked_routes(), 0);
    }

    #[tokio::test]
    async fn test_steps_cannot_target_path_routes() {
        let f = fixture().await;
        let saved = f
            .controller
            .save_route(save_request(&f, vec![point(0.0, 0.0), point(1.0, 1.0)]))
            .await
            .unwrap();

        let result = f.controller.append_step(step(saved.route_id, 0, "walk", 1.0)).await;
        assert!(matches!(result, Err(AppError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_finalize_without_route_id_is_noop() {
        let f = fixture().await;
        let stopped = f.controller.finalize_route(StopRouteRequest::default()).await.unwrap();
        assert_eq!(stopped.message, "Route completed");
        assert!(stopped.route_id.is_none());
    }
}
