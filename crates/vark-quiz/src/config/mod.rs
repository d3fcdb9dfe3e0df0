use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_MS: u64 = 60_000;

/// Deployment stage; only development enables colored log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

/// Everything the quiz service and CLI read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
    pub recommendation: RecommendationConfig,
    pub questions_csv: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = env_string("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or_default();

        let server = ServerConfig {
            host: env_string("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match env_string("APP_PORT") {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
                None => DEFAULT_PORT,
            },
            public_base_url: env_string("PUBLIC_BASE_URL"),
        };

        let telemetry = TelemetryConfig {
            log_level: env_string("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            ansi: environment.is_development(),
        };

        let store = StoreConfig {
            url: env_string("STORE_URL"),
            api_key: env_string("STORE_API_KEY"),
            timeout: env_millis("STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS)?,
        };

        let recommendation = RecommendationConfig {
            api_key: env_string("GEMINI_API_KEY"),
            model: env_string("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            endpoint: env_string("GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            timeout: env_millis("GEMINI_TIMEOUT_MS", DEFAULT_GEMINI_TIMEOUT_MS)?,
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            store,
            recommendation,
            questions_csv: env_string("QUESTIONS_CSV").map(PathBuf::from),
        })
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_millis(key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env_string(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidTimeout { key }),
        None => Ok(Duration::from_millis(default)),
    }
}

/// Bind address plus the origin used when printing share links.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin prepended to share paths, e.g. `https://quiz.example.org`.
    pub public_base_url: Option<String>,
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

    pub fn share_url(&self, share_path: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), share_path),
            None => format!("http://{}:{}{}", self.host, self.port, share_path),
        }
    }
}

/// Log filter and output style for `telemetry::init`.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored output; only enabled for local development.
    pub ansi: bool,
}

/// Remote question/result store. Absent `url` means the in-process store is used.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn is_remote(&self) -> bool {
        self.url.is_some()
    }
}

/// Text-generation service used for study recommendations.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl RecommendationConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
            && !self.model.trim().is_empty()
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_GEMINI_TIMEOUT_MS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a port number (0-65535)"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must be an IP address or 'localhost'")
            }
            ConfigError::InvalidTimeout { key } => {
                write!(f, "{key} must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "PUBLIC_BASE_URL",
            "STORE_URL",
            "STORE_API_KEY",
            "STORE_TIMEOUT_MS",
            "GEMINI_API_KEY",
            "GEMINI_MODEL",
            "GEMINI_ENDPOINT",
            "GEMINI_TIMEOUT_MS",
            "QUESTIONS_CSV",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.store.is_remote());
        assert_eq!(config.store.timeout, Duration::from_millis(10_000));
        assert!(!config.recommendation.is_configured());
        assert_eq!(config.recommendation.model, "gemini-2.5-flash");
        assert!(config.questions_csv.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn production_disables_ansi_and_validates_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.telemetry.ansi);

        env::set_var("APP_PORT", "70000");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn reads_store_and_recommendation_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STORE_URL", "https://store.example.org");
        env::set_var("GEMINI_API_KEY", "secret");
        env::set_var("GEMINI_TIMEOUT_MS", "1500");
        let config = AppConfig::load().expect("config loads");
        assert!(config.store.is_remote());
        assert!(config.recommendation.is_configured());
        assert_eq!(config.recommendation.timeout, Duration::from_millis(1500));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_timeouts() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STORE_TIMEOUT_MS", "soon");
        let err = AppConfig::load().expect_err("timeout rejected");
        assert!(matches!(err, ConfigError::InvalidTimeout { key: "STORE_TIMEOUT_MS" }));
        reset_env();
    }

    #[test]
    fn share_url_prefers_public_base() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_base_url: Some("https://quiz.example.org/".to_string()),
        };
        assert_eq!(server.share_url("/shared/7"), "https://quiz.example.org/shared/7");

        let server = ServerConfig {
            public_base_url: None,
            ..server
        };
        assert_eq!(server.share_url("/shared/7"), "http://0.0.0.0:8080/shared/7");
    }
}
