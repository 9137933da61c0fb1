// ============================================================================
// CONFIG - Configuración de la app en tiempo de compilación
// ============================================================================
// build.rs reenvía las variables de .env; aquí se leen con option_env!
// ============================================================================

use serde::{Deserialize, Serialize};

const DEFAULT_SERVER_DOMAIN: &str = "https://omer-matan.cs.bgu.ac.il";
const DEVELOPMENT_SERVER_DOMAIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL base del backend de recetas (la usa la capa HTTP, no el store)
    pub server_domain: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_domain: DEFAULT_SERVER_DOMAIN.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("SERVER_DOMAIN"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(
        server_domain: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        let environment = environment
            .map(str::to_string)
            .unwrap_or(defaults.environment);

        // Sin SERVER_DOMAIN explícito, desarrollo apunta al backend local
        let server_domain = match server_domain {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if environment == "development" => DEVELOPMENT_SERVER_DOMAIN.to_string(),
            None => defaults.server_domain,
        };

        Self {
            server_domain,
            environment,
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: log_level
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Nivel para wasm-logger
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
