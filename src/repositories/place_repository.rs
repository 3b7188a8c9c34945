use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Place;
use crate::utils::errors::AppError;

pub struct PlaceRepository {
    pool: SqlitePool,
}

impl PlaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<Place, AppError> {
        let place = sqlx::query_as::<_, Place>(
            r#"
            INSERT INTO places (name, created_at)
            VALUES (?, ?)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(place)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Place>, AppError> {
        let place = sqlx::query_as::<_, Place>("SELECT id, name, created_at FROM places WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(place)
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM places WHERE name = ?)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn list_all(&self) -> Result<Vec<Place>, AppError> {
        let places = sqlx::query_as::<_, Place>("SELECT id, name, created_at FROM places ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(places)
    }
}
