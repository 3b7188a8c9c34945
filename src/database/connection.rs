//! Configuración de conexión a la base de datos
//!
//! Este módulo abre el pool de SQLite y crea las tablas al arrancar.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Crear el pool de conexiones y aplicar las migraciones pendientes
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    info!("🗄️  Conectando a {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .with_context(|| format!("Error conectando a {}", mask_database_url(&config.url)))?;

    run_migrations(&pool).await.context("Error ejecutando migraciones")?;

    Ok(pool)
}

/// Pool en memoria con el esquema aplicado, usado por los tests
pub async fn connect_in_memory() -> Result<SqlitePool> {
    create_pool(&DatabaseConfig::in_memory()).await
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(_colon_pos) = url[..at_pos].rfind(':') {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
