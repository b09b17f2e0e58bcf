use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEV_JWT_SECRET: &str = "estate-development-secret-change-me";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

/// Local upload storage configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadConfig,
    pub log_level: String,
    pub log_format: String,
    pub http_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub public_api_url: Option<String>,
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse::<T>().ok())
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required")?;

        let max_connections = parse_var::<u32>("DATABASE_MAX_CONNECTIONS").unwrap_or(10);
        let acquire_timeout_secs = parse_var::<u64>("DATABASE_ACQUIRE_TIMEOUT_SECS").unwrap_or(30);
        let idle_timeout_secs = parse_var::<u64>("DATABASE_IDLE_TIMEOUT_SECS").unwrap_or(600); // 10 minutes
        let max_lifetime_secs = parse_var::<u64>("DATABASE_MAX_LIFETIME_SECS").unwrap_or(1800); // 30 minutes
        let test_before_acquire = parse_var::<bool>("DATABASE_TEST_BEFORE_ACQUIRE").unwrap_or(true);

        if max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            test_before_acquire,
        })
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/estate".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
        }
    }
}

impl AuthConfig {
    /// Read the signing secret and token lifetime.
    ///
    /// Production refuses to start with a missing or short secret; other
    /// environments fall back to a fixed development secret.
    pub fn from_env(is_production: bool) -> Result<Self, String> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if is_production => {
                return Err("JWT_SECRET is required in production".to_string())
            }
            Err(_) => DEV_JWT_SECRET.to_string(),
        };

        if is_production && jwt_secret.len() < 16 {
            return Err("JWT_SECRET must be at least 16 characters in production".to_string());
        }

        let token_ttl_secs = parse_var::<u64>("JWT_TTL_SECS").unwrap_or(86_400);
        if token_ttl_secs == 0 {
            return Err("JWT_TTL_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
        })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: 86_400,
        }
    }
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, String> {
        let dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let max_bytes = parse_var::<usize>("UPLOAD_MAX_BYTES").unwrap_or(10 * 1024 * 1024);
        if max_bytes == 0 {
            return Err("UPLOAD_MAX_BYTES must be greater than 0".to_string());
        }

        Ok(Self { dir, max_bytes })
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let database = DatabaseConfig::from_env()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let http_port = parse_var::<u16>("HTTP_PORT").unwrap_or(5000);

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        let valid_log_formats = ["text", "json"];
        if !valid_log_formats.contains(&log_format.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_FORMAT: {}. Must be one of: {:?}",
                log_format, valid_log_formats
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }
        let environment = environment.to_lowercase();

        let auth = AuthConfig::from_env(environment == "production")?;
        let uploads = UploadConfig::from_env()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let public_api_url = env::var("PUBLIC_API_URL").ok().filter(|s| !s.is_empty());

        Ok(Self {
            database,
            auth,
            uploads,
            log_level: log_level.to_lowercase(),
            log_format: log_format.to_lowercase(),
            http_port,
            environment,
            cors_origins,
            public_api_url,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// JSON log lines in production or when asked for explicitly
    pub fn json_logs(&self) -> bool {
        self.log_format == "json" || self.is_production()
    }

    /// Get database URL (convenience method)
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            uploads: UploadConfig::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            http_port: 5000,
            environment: "development".to_string(),
            cors_origins: Vec::new(),
            public_api_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 30);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.http_port, 5000);
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(!config.json_logs());
    }

    #[test]
    #[serial]
    fn test_auth_config_requires_secret_in_production() {
        env::remove_var("JWT_SECRET");
        assert!(AuthConfig::from_env(true).is_err());

        let dev = AuthConfig::from_env(false).unwrap();
        assert_eq!(dev.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(dev.token_ttl_secs, 86_400);
    }

    #[test]
    #[serial]
    fn test_auth_config_rejects_short_production_secret() {
        env::set_var("JWT_SECRET", "short");
        assert!(AuthConfig::from_env(true).is_err());
        assert!(AuthConfig::from_env(false).is_ok());
        env::remove_var("JWT_SECRET");
    }

    #[test]
    #[serial]
    fn test_app_config_parses_cors_origins() {
        env::set_var("DATABASE_URL", "postgresql://localhost/estate_test");
        env::set_var("CORS_ORIGINS", "http://localhost:5173, https://estate.example.com,,");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(
            config.cors_origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://estate.example.com".to_string()
            ]
        );
        env::remove_var("CORS_ORIGINS");
        env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn test_app_config_rejects_unknown_environment() {
        env::set_var("DATABASE_URL", "postgresql://localhost/estate_test");
        env::set_var("ENVIRONMENT", "qa");
        assert!(AppConfig::from_env().is_err());
        env::remove_var("ENVIRONMENT");
        env::remove_var("DATABASE_URL");
    }
}
