use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::wellness::EngineConfig;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: load_engine_config()?,
        })
    }
}

fn load_engine_config() -> Result<EngineConfig, ConfigError> {
    let defaults = EngineConfig::default();

    let config = EngineConfig {
        fitness_weight: weight_from_env("APP_FITNESS_WEIGHT", defaults.fitness_weight)?,
        recovery_weight: weight_from_env("APP_RECOVERY_WEIGHT", defaults.recovery_weight)?,
        lifestyle_weight: weight_from_env("APP_LIFESTYLE_WEIGHT", defaults.lifestyle_weight)?,
        consistency_weight: weight_from_env(
            "APP_CONSISTENCY_WEIGHT",
            defaults.consistency_weight,
        )?,
        plan_creation_xp: match env::var("APP_PLAN_CREATION_XP") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidXpAward)?,
            Err(_) => defaults.plan_creation_xp,
        },
    };

    validate_engine_config(&config)?;
    Ok(config)
}

fn weight_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidWeight { name })?;

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidWeight { name });
    }

    Ok(value)
}

/// Rejects weight sets that would let the composite score leave `0..=100`.
pub fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let sum = config.weight_sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightsDoNotSumToOne { sum });
    }
    Ok(())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWeight { name: &'static str },
    WeightsDoNotSumToOne { sum: f64 },
    InvalidXpAward,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWeight { name } => {
                write!(f, "{name} must be a number between 0 and 1")
            }
            ConfigError::WeightsDoNotSumToOne { sum } => {
                write!(f, "score weights must sum to 1.0 (found {sum:.4})")
            }
            ConfigError::InvalidXpAward => {
                write!(f, "APP_PLAN_CREATION_XP must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidWeight { .. }
            | ConfigError::WeightsDoNotSumToOne { .. }
            | ConfigError::InvalidXpAward => None,
        }
    }
}
