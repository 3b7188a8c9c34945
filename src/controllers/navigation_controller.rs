//! Resolución de rutas para el usuario final
//!
//! Sólo lecturas: mismo resultado en llamadas repetidas y seguro en concurrencia.

use sqlx::SqlitePool;
use tracing::debug;

use crate::dto::route_dto::{NavigateQuery, PathNavigationResponse, StepResponse};
use crate::models::{RouteBody, RouteKind};
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;

pub struct NavigationController {
    routes: RouteRepository,
}

impl NavigationController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            routes: RouteRepository::new(pool),
        }
    }

    /// Instrucciones de la primera ruta paso a paso para (place, from, to).
    /// Una ruta sin pasos devuelve una lista vacía, no un error.
    pub async fn resolve_stepwise(&self, query: NavigateQuery) -> Result<Vec<StepResponse>, AppError> {
        let route = self
            .routes
            .find_first(query.place_id, query.from, query.to, RouteKind::Stepwise)
            .await?
            .ok_or_else(|| route_not_found(&query))?;

        let steps = match self.routes.load_body(&route).await? {
            RouteBody::Stepwise(steps) => steps,
            RouteBody::Path(_) => return Err(route_not_found(&query)),
        };
        debug!("🧭 Ruta {} resuelta con {} pasos", route.id, steps.len());

        Ok(steps.into_iter().map(StepResponse::from).collect())
    }

    /// Trazo de la primera ruta de coordenadas para (place, from, to)
    pub async fn resolve_path(&self, query: NavigateQuery) -> Result<PathNavigationResponse, AppError> {
        let found = self
            .routes
            .find_first_with_names(query.place_id, query.from, query.to, RouteKind::Path)
            .await?
            .ok_or_else(|| route_not_found(&query))?;

        let path = match self.routes.load_body(&found.route).await? {
            RouteBody::Path(points) => points,
            RouteBody::Stepwise(_) => return Err(route_not_found(&query)),
        };
        debug!("🧭 Trazo {} resuelto con {} puntos", found.route.id, path.len());

        Ok(PathNavigationResponse {
            route_id: found.route.id,
            floor: found.route.floor,
            location_name: found.route.location_name,
            from_name: found.from_name,
            to_name: found.to_name,
            path,
        })
    }
}

fn route_not_found(query: &NavigateQuery) -> AppError {
    AppError::NotFound(format!(
        "Route not found from {} to {} in place {}",
        query.from, query.to, query.place_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;
    use crate::models::route::NewRoute;
    use crate::models::PathPoint;
    use crate::repositories::location_repository::LocationRepository;
    use crate::repositories::place_repository::PlaceRepository;

    struct Fixture {
        routes: RouteRepository,
        controller: NavigationController,
        header: NewRoute,
    }

    async fn fixture() -> Fixture {
        let pool = connect_in_memory().await.unwrap();
        let place = PlaceRepository::new(pool.clone()).create("Campus").await.unwrap();
        let locations = LocationRepository::new(pool.clone());
        let library = locations.create(place.id, "Library", "Ground").await.unwrap();
        let lab = locations.create(place.id, "Lab 3", "Third").await.unwrap();

        Fixture {
            routes: RouteRepository::new(pool.clone()),
            controller: NavigationController::new(pool),
            header: NewRoute {
                place_id: place.id,
                from_location_id: library.id,
                to_location_id: lab.id,
                floor: "Third".to_string(),
                location_name: Some("Lab wing".to_string()),
            },
        }
    }

    fn query(header: &NewRoute) -> NavigateQuery {
        NavigateQuery {
            place_id: header.place_id,
            from: header.from_location_id,
            to: header.to_location_id,
        }
    }

    #[tokio::test]
    async fn test_unknown_triple_is_not_found() {
        let f = fixture().await;
        let q = query(&f.header);

        assert!(matches!(f.controller.resolve_stepwise(q).await, Err(AppError::NotFound(_))));
        assert!(matches!(f.controller.resolve_path(q).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_stepwise_route_resolves_to_empty_list() {
        let f = fixture().await;
        f.routes.create(RouteKind::Stepwise, &f.header).await.unwrap();

        let steps = f.controller.resolve_stepwise(query(&f.header)).await.unwrap();
        assert!(steps.is_empty());
    }

    #[tokio::test]
    async fn test_reverse_direction_is_not_inferred() {
        let f = fixture().await;
        f.routes
            .create_path(&f.header, &[PathPoint::new(0.0, 0.0), PathPoint::new(5.0, 5.0)])
            .await
            .unwrap();

        let reverse = NavigateQuery {
            place_id: f.header.place_id,
            from: f.header.to_location_id,
            to: f.header.from_location_id,
        };
        assert!(matches!(f.controller.resolve_path(reverse).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_path_attaches_names_and_is_idempotent() {
        let f = fixture().await;
        let points = vec![
            PathPoint::new(0.0, 0.0),
            PathPoint::new(0.30000000000000004, 7.5),
            PathPoint::new(10.0, 20.0),
        ];
        let route = f.routes.create_path(&f.header, &points).await.unwrap();

        let first = f.controller.resolve_path(query(&f.header)).await.unwrap();
        assert_eq!(first.route_id, route.id);
        assert_eq!(first.from_name, "Library");
        assert_eq!(first.to_name, "Lab 3");
        assert_eq!(first.floor, "Third");
        assert_eq!(first.location_name.as_deref(), Some("Lab wing"));
        assert_eq!(first.path, points);

        let second = f.controller.resolve_path(query(&f.header)).await.unwrap();
        assert_eq!(second.path, first.path);
    }

    #[tokio::test]
    async fn test_path_and_stepwise_do_not_shadow_each_other() {
        let f = fixture().await;
        let stepwise = f.routes.create(RouteKind::Stepwise, &f.header).await.unwrap();
        f.routes.append_step(stepwise.id, 0, "walk", 4.5).await.unwrap();
        let path = f
            .routes
            .create_path(&f.header, &[PathPoint::new(1.0, 2.0), PathPoint::new(3.0, 4.0)])
            .await
            .unwrap();

        let steps = f.controller.resolve_stepwise(query(&f.header)).await.unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].action, "walk");

        let map = f.controller.resolve_path(query(&f.header)).await.unwrap();
        assert_eq!(map.route_id, path.id);
    }
}
