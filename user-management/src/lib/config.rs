use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Longest token lifetime accepted at startup (366 days)
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 366;

    /// Token lifetime, or an error when `expiration_hours` is out of range.
    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }

        chrono::Duration::try_hours(self.expiration_hours).ok_or_else(|| {
            ConfigError::Message("jwt.expiration_hours is out of range".into())
        })
    }
}

// Keeps the signing secret out of startup logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"**redacted**")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when a required key (notably `jwt.secret`) is missing or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=sqlite://users.db overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_configuration(configuration)
    }

    /// Deserialize and validate an already layered configuration.
    pub fn from_configuration(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        self.jwt.token_ttl()?;
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Config::from_configuration(configuration)
    }

    #[test]
    fn test_load_complete_configuration() {
        let config = from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            expiration_hours = 24
            "#,
        )
        .expect("Configuration should load");

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.jwt.token_ttl().unwrap(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            expiration_hours = 24
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let result = from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            secret = "   "
            expiration_hours = 24
            "#,
        );

        assert!(result.unwrap_err().to_string().contains("jwt.secret"));
    }

    #[test]
    fn test_non_positive_expiration_is_rejected() {
        let result = from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            expiration_hours = 0
            "#,
        );

        assert!(result.unwrap_err().to_string().contains("expiration_hours"));
    }

    #[test]
    fn test_oversized_expiration_is_rejected() {
        for hours in ["3000000000", "9223372036854775807", "8785"] {
            let result = from_toml(&format!(
                r#"
                [database]
                url = "sqlite::memory:"

                [server]
                http_port = 8080

                [jwt]
                secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
                expiration_hours = {}
                "#,
                hours
            ));

            assert!(
                result.unwrap_err().to_string().contains("expiration_hours"),
                "{} hours should be rejected",
                hours
            );
        }
    }

    #[test]
    fn test_longest_expiration_issues_tokens() {
        let jwt = JwtConfig {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            expiration_hours: JwtConfig::MAX_EXPIRATION_HOURS,
        };
        let authenticator =
            auth::Authenticator::new(jwt.secret.as_bytes(), jwt.token_ttl().unwrap());

        assert!(authenticator.issue_token(1, chrono::Utc::now()).is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let jwt = JwtConfig {
            secret: "super-secret".to_string(),
            expiration_hours: 1,
        };

        assert!(!format!("{:?}", jwt).contains("super-secret"));
    }
}
