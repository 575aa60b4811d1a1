//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Backend de almacenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("Unknown STORE_BACKEND '{}' (expected 'postgres' or 'memory')", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Postgres => f.write_str("postgres"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub store_backend: StoreBackend,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 5000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            store_backend: StoreBackend::Postgres,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => 5000,
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StoreBackend::Postgres,
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store_backend,
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.server_url(), "0.0.0.0:5000");
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.environment, "development");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_default_matches_empty_environment() {
        let from_env = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        let default = EnvironmentConfig::default();
        assert_eq!(default.store_backend, from_env.store_backend);
        assert_eq!(default.server_url(), from_env.server_url());
        assert_eq!(default.environment, from_env.environment);
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("ENVIRONMENT", "production"),
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(config.server_url(), "127.0.0.1:8080");
        assert!(config.is_production());
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "mongo")])).is_err());
    }
}
