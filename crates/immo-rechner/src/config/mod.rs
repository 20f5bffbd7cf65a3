use crate::valuation::{InvalidMatrixEntry, PricingConfiguration};
use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

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
    pub pricing: PricingConfiguration,
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

        let pricing = match env::var_os("APP_PRICING_MATRIX") {
            Some(path) => load_pricing_matrix(Path::new(&path))?,
            None => PricingConfiguration::standard(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing,
        })
    }
}

/// Reads an administrator-maintained matrix from a JSON document.
pub fn load_pricing_matrix(path: &Path) -> Result<PricingConfiguration, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::PricingMatrixRead {
        path: path.to_path_buf(),
        source,
    })?;

    let matrix: PricingConfiguration =
        serde_json::from_str(&raw).map_err(|source| ConfigError::PricingMatrixParse {
            path: path.to_path_buf(),
            source,
        })?;

    matrix
        .validate()
        .map_err(ConfigError::InvalidPricingMatrix)?;

    Ok(matrix)
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
    InvalidHost {
        source: std::net::AddrParseError,
    },
    PricingMatrixRead {
        path: PathBuf,
        source: std::io::Error,
    },
    PricingMatrixParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidPricingMatrix(InvalidMatrixEntry),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::PricingMatrixRead { path, .. } => {
                write!(f, "unable to read pricing matrix {}", path.display())
            }
            ConfigError::PricingMatrixParse { path, .. } => {
                write!(f, "pricing matrix {} is not valid JSON", path.display())
            }
            ConfigError::InvalidPricingMatrix(entry) => write!(f, "{entry}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PricingMatrixRead { source, .. } => Some(source),
            ConfigError::PricingMatrixParse { source, .. } => Some(source),
            ConfigError::InvalidPricingMatrix(entry) => Some(entry),
        }
    }
}
