//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use sqlx::SqlitePool;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::environment::EnvironmentConfig;

type LockMap = HashMap<i64, Arc<Mutex<()>>>;

/// Candados de escritura por ruta.
///
/// Dos grabadores que añaden pasos a la misma ruta se serializan; rutas
/// distintas no se bloquean entre sí. La entrada de una ruta desaparece del
/// mapa cuando se suelta el último guard que la usaba.
#[derive(Clone, Default)]
pub struct RouteWriteLocks {
    locks: Arc<StdMutex<LockMap>>,
}

impl RouteWriteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Esperar el turno de escritura para `route_id`
    pub async fn acquire(&self, route_id: i64) -> RouteWriteGuard {
        let lock = lock_map(&self.locks).entry(route_id).or_default().clone();
        // Creada antes de esperar para que la poda ocurra también si se cancela
        let registration = Registration {
            route_id,
            locks: self.locks.clone(),
        };
        tracing::trace!("🔒 Esperando candado de la ruta {}", route_id);
        let guard = lock.lock_owned().await;

        RouteWriteGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_routes(&self) -> usize {
        lock_map(&self.locks).len()
    }
}

// El mapa sólo se toca en secciones cortas sin `.await`
fn lock_map(locks: &StdMutex<LockMap>) -> MutexGuard<'_, LockMap> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Turno de escritura sobre una ruta; se libera al soltarlo
pub struct RouteWriteGuard {
    // Orden de campos = orden de drop: primero el candado, luego la poda
    _guard: OwnedMutexGuard<()>,
    _registration: Registration,
}

struct Registration {
    route_id: i64,
    locks: Arc<StdMutex<LockMap>>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        let mut locks = lock_map(&self.locks);
        let unused = locks
            .get(&self.route_id)
            .map(|lock| Arc::strong_count(lock) == 1)
            .unwrap_or(false);
        if unused {
            locks.remove(&self.route_id);
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub route_locks: RouteWriteLocks,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            route_locks: RouteWriteLocks::new(),
        }
    }
}
