//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los almacenes se inyectan como trait objects.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::{EnvironmentConfig, StoreBackend};
use crate::repositories::{
    BookingRepository, BookingStore, InMemoryStore, VehicleRepository, VehicleStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleStore>,
    pub bookings: Arc<dyn BookingStore>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleStore>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            config,
            vehicles,
            bookings,
        }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_postgres(config: EnvironmentConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(VehicleRepository::new(pool.clone())),
            Arc::new(BookingRepository::new(pool)),
        )
    }

    /// Estado respaldado por el almacén en memoria
    pub fn in_memory(mut config: EnvironmentConfig) -> Self {
        config.store_backend = StoreBackend::Memory;
        let store = Arc::new(InMemoryStore::new());
        Self::new(config, store.clone(), store)
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.config.store_backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_reports_its_backend() {
        let state = AppState::in_memory(EnvironmentConfig::default());
        assert_eq!(state.store_backend(), StoreBackend::Memory);
    }
}
