use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub intake: IntakeConfig,
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
            intake: IntakeConfig::from_env()?,
        })
    }
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

pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 90;
pub const DEFAULT_DUPLICATE_MIN_FIELDS: usize = 2;

/// Tunables for the certificate intake pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Days before expiry at which a certificate is reported as expiring soon.
    pub expiring_soon_days: u32,
    /// Fewer comparable fields than this never yields a duplicate verdict.
    pub duplicate_min_fields: usize,
    /// Grace days keyed by certificate term type, layered over the zero-day defaults.
    pub grace_overrides: BTreeMap<String, u32>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
            duplicate_min_fields: DEFAULT_DUPLICATE_MIN_FIELDS,
            grace_overrides: BTreeMap::new(),
        }
    }
}

impl IntakeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let expiring_soon_days = match env::var("INTAKE_EXPIRING_SOON_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidExpiringSoonDays)?,
            Err(_) => DEFAULT_EXPIRING_SOON_DAYS,
        };

        let duplicate_min_fields = match env::var("INTAKE_DUPLICATE_MIN_FIELDS") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidDuplicateMinimum),
            },
            Err(_) => DEFAULT_DUPLICATE_MIN_FIELDS,
        };

        let grace_overrides = match env::var("INTAKE_GRACE_PERIODS") {
            Ok(raw) => parse_grace_overrides(&raw)?,
            Err(_) => BTreeMap::new(),
        };

        Ok(Self {
            expiring_soon_days,
            duplicate_min_fields,
            grace_overrides,
        })
    }
}

/// Parses `Interim=30;Full Term=0` style entries.
fn parse_grace_overrides(raw: &str) -> Result<BTreeMap<String, u32>, ConfigError> {
    let mut overrides = BTreeMap::new();

    for entry in raw.split(';').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (name, days) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidGracePeriod {
                entry: entry.to_string(),
            })?;
        let name = name.trim();
        let days = days
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidGracePeriod {
                entry: entry.to_string(),
            })?;
        if name.is_empty() {
            return Err(ConfigError::InvalidGracePeriod {
                entry: entry.to_string(),
            });
        }
        overrides.insert(name.to_string(), days);
    }

    Ok(overrides)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidExpiringSoonDays,
    InvalidDuplicateMinimum,
    InvalidGracePeriod { entry: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidExpiringSoonDays => {
                write!(f, "INTAKE_EXPIRING_SOON_DAYS must be a non-negative integer")
            }
            ConfigError::InvalidDuplicateMinimum => {
                write!(f, "INTAKE_DUPLICATE_MIN_FIELDS must be a positive integer")
            }
            ConfigError::InvalidGracePeriod { entry } => write!(
                f,
                "INTAKE_GRACE_PERIODS entry '{entry}' must look like 'Certificate Type=days'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
