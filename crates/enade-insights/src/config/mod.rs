use crate::analysis::Benchmark;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_INSTITUTION: &str = "UNIVERSIDADE DE FORTALEZA";
const DEFAULT_STATE: &str = "CE";
const DEFAULT_REGION: &str = "AL,BA,CE,MA,PB,PE,PI,RN,SE";

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
    pub data: DataConfig,
    pub benchmark: BenchmarkConfig,
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

        let dataset_path = env::var("APP_DATASET_PATH")
            .unwrap_or_else(|_| "data/questionnaire_summary.csv".to_string());
        let snapshot_path =
            env::var("APP_SNAPSHOT_PATH").unwrap_or_else(|_| "data/web_data.json".to_string());

        let institution = env::var("APP_TARGET_INSTITUTION")
            .unwrap_or_else(|_| DEFAULT_INSTITUTION.to_string());
        if institution.trim().is_empty() {
            return Err(ConfigError::EmptyInstitution);
        }
        let state = env::var("APP_TARGET_STATE")
            .unwrap_or_else(|_| DEFAULT_STATE.to_string())
            .trim()
            .to_ascii_uppercase();
        let region = parse_state_list(
            &env::var("APP_TARGET_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig {
                dataset_path: PathBuf::from(dataset_path),
                snapshot_path: PathBuf::from(snapshot_path),
            },
            benchmark: BenchmarkConfig {
                institution: institution.trim().to_string(),
                state,
                region,
            },
        })
    }
}

fn parse_state_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let states: Vec<String> = raw
        .split(',')
        .map(|state| state.trim().to_ascii_uppercase())
        .filter(|state| !state.is_empty())
        .collect();

    match states.iter().find(|state| state.len() != 2) {
        Some(invalid) => Err(ConfigError::InvalidStateCode(invalid.clone())),
        None => Ok(states),
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

/// Where the questionnaire export and the precomputed snapshot live.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub dataset_path: PathBuf,
    pub snapshot_path: PathBuf,
}

/// Institution under study and the geography it is compared with.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub institution: String,
    pub state: String,
    pub region: Vec<String>,
}

impl BenchmarkConfig {
    pub fn to_benchmark(&self) -> Benchmark {
        Benchmark {
            institution: self.institution.clone(),
            state: self.state.clone(),
            region: self.region.clone(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidStateCode(String),
    EmptyInstitution,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidStateCode(code) => write!(
                f,
                "APP_TARGET_REGION entries must be two-letter state codes, got '{code}'"
            ),
            ConfigError::EmptyInstitution => write!(f, "APP_TARGET_INSTITUTION must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidStateCode(_)
            | ConfigError::EmptyInstitution => None,
        }
    }
}
