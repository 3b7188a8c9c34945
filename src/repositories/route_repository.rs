use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::route::NewRoute;
use crate::models::{PathPoint, Route, RouteBody, RouteKind, RouteStep};
use crate::utils::errors::AppError;

const ROUTE_COLUMNS: &str =
    "id, kind, place_id, from_location_id, to_location_id, floor, location_name, created_at";

/// Ruta con los nombres de sus extremos ya resueltos
#[derive(Debug, sqlx::FromRow)]
pub struct RouteWithNames {
    #[sqlx(flatten)]
    pub route: Route,
    pub from_name: String,
    pub to_name: String,
}

pub struct RouteRepository {
    pool: SqlitePool,
}

impl RouteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Crear sólo la cabecera; los pasos llegan después uno a uno
    pub async fn create(&self, kind: RouteKind, route: &NewRoute) -> Result<Route, AppError> {
        let created = sqlx::query_as::<_, Route>(&format!(
            r#"
            INSERT INTO routes (kind, place_id, from_location_id, to_location_id, floor, location_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            ROUTE_COLUMNS
        ))
        .bind(kind)
        .bind(route.place_id)
        .bind(route.from_location_id)
        .bind(route.to_location_id)
        .bind(&route.floor)
        .bind(&route.location_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Crear una ruta de trazo con todos sus puntos en una sola transacción.
    /// `point_order` se asigna 0..n en el orden recibido.
    pub async fn create_path(&self, route: &NewRoute, points: &[PathPoint]) -> Result<Route, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Route>(&format!(
            r#"
            INSERT INTO routes (kind, place_id, from_location_id, to_location_id, floor, location_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            ROUTE_COLUMNS
        ))
        .bind(RouteKind::Path)
        .bind(route.place_id)
        .bind(route.from_location_id)
        .bind(route.to_location_id)
        .bind(&route.floor)
        .bind(&route.location_name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for (order, point) in points.iter().enumerate() {
            sqlx::query("INSERT INTO route_points (route_id, point_order, x, y) VALUES (?, ?, ?, ?)")
                .bind(created.id)
                .bind(order as i64)
                .bind(point.x)
                .bind(point.y)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>(&format!("SELECT {} FROM routes WHERE id = ?", ROUTE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    /// Primera ruta del tipo dado para (place, from, to); con duplicados gana el id más bajo
    pub async fn find_first(
        &self,
        place_id: i64,
        from_id: i64,
        to_id: i64,
        kind: RouteKind,
    ) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>(&format!(
            r#"
            SELECT {}
            FROM routes
            WHERE place_id = ? AND from_location_id = ? AND to_location_id = ? AND kind = ?
            ORDER BY id
            LIMIT 1
            "#,
            ROUTE_COLUMNS
        ))
        .bind(place_id)
        .bind(from_id)
        .bind(to_id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    /// Igual que `find_first` pero con los nombres de las ubicaciones.
    /// Una ubicación que no existe aparece como cadena vacía.
    pub async fn find_first_with_names(
        &self,
        place_id: i64,
        from_id: i64,
        to_id: i64,
        kind: RouteKind,
    ) -> Result<Option<RouteWithNames>, AppError> {
        let route = sqlx::query_as::<_, RouteWithNames>(
            r#"
            SELECT r.id, r.kind, r.place_id, r.from_location_id, r.to_location_id,
                   r.floor, r.location_name, r.created_at,
                   COALESCE(f.name, '') AS from_name,
                   COALESCE(t.name, '') AS to_name
            FROM routes r
            LEFT JOIN locations f ON f.id = r.from_location_id
            LEFT JOIN locations t ON t.id = r.to_location_id
            WHERE r.place_id = ? AND r.from_location_id = ? AND r.to_location_id = ? AND r.kind = ?
            ORDER BY r.id
            LIMIT 1
            "#,
        )
        .bind(place_id)
        .bind(from_id)
        .bind(to_id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn list_by_place(&self, place_id: i64, kind: RouteKind) -> Result<Vec<Route>, AppError> {
        let routes = sqlx::query_as::<_, Route>(&format!(
            "SELECT {} FROM routes WHERE place_id = ? AND kind = ? ORDER BY id",
            ROUTE_COLUMNS
        ))
        .bind(place_id)
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn append_step(
        &self,
        route_id: i64,
        step_order: i64,
        action: &str,
        distance: f64,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO route_steps (route_id, step_order, action, distance) VALUES (?, ?, ?, ?)")
            .bind(route_id)
            .bind(step_order)
            .bind(action)
            .bind(distance)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn step_exists(&self, route_id: i64, step_order: i64) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM route_steps WHERE route_id = ? AND step_order = ?)",
        )
        .bind(route_id)
        .bind(step_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn steps_for(&self, route_id: i64) -> Result<Vec<RouteStep>, AppError> {
        let steps = sqlx::query_as::<_, RouteStep>(
            "SELECT step_order, action, distance FROM route_steps WHERE route_id = ? ORDER BY step_order, id",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(steps)
    }

    pub async fn points_for(&self, route_id: i64) -> Result<Vec<PathPoint>, AppError> {
        let points = sqlx::query_as::<_, PathPoint>(
            "SELECT x, y FROM route_points WHERE route_id = ? ORDER BY point_order, id",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    /// Cargar los hijos de una ruta según su tipo
    pub async fn load_body(&self, route: &Route) -> Result<RouteBody, AppError> {
        match route.kind {
            RouteKind::Stepwise => Ok(RouteBody::Stepwise(self.steps_for(route.id).await?)),
            RouteKind::Path => Ok(RouteBody::Path(self.points_for(route.id).await?)),
        }
    }
}
