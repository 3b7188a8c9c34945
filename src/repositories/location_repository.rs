use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Location;
use crate::utils::errors::AppError;

pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, place_id: i64, name: &str, floor: &str) -> Result<Location, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (place_id, name, floor, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, place_id, name, floor, created_at
            "#,
        )
        .bind(place_id)
        .bind(name)
        .bind(floor)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, place_id, name, floor, created_at FROM locations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn list_by_place(&self, place_id: i64) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, place_id, name, floor, created_at FROM locations WHERE place_id = ? ORDER BY id",
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn list_all(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, place_id, name, floor, created_at FROM locations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }
}
