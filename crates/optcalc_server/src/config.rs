//! Server configuration
//!
//! Sources, lowest to highest priority: built-in defaults, an optional TOML
//! file, `OPTCALC_*` environment variables, command-line flags. The
//! `[calculator]` table of the file carries the numerical settings.

use optcalc_models::CalculatorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "OPTCALC_SERVER_HOST";
/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "OPTCALC_SERVER_PORT";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "OPTCALC_LOG_LEVEL";
/// Environment variable overriding the deployment environment
pub const ENV_ENVIRONMENT: &str = "OPTCALC_ENV";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port is zero or unparsable
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(String),

    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown environment name
    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    /// Config file could not be read or parsed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Invalid `[calculator]` settings
    #[error(transparent)]
    Calculator(#[from] optcalc_models::config::ConfigError),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Debugging detail
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Rejected calculations and recoverable problems
    Warn,
    /// Failures only
    Error,
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// `EnvFilter` directive for this level
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        value.parse()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Deployment environment, reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Pre-production
    Staging,
    /// Production
    Production,
}

impl Environment {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level, superseded by `RUST_LOG` when set
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Numerical settings for every calculator (`[calculator]` table)
    pub calculator: CalculatorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            calculator: CalculatorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Overwrite every field the overrides set
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
    }

    /// Reject port 0 and invalid calculator settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }
        self.calculator.validate()?;
        Ok(())
    }

    /// `host:port`
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parsed values from one override source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Bind host
    pub host: Option<String>,
    /// Bind port
    pub port: Option<u16>,
    /// Log level
    pub log_level: Option<LogLevel>,
    /// Deployment environment
    pub environment: Option<Environment>,
}

impl Overrides {
    /// Read the `OPTCALC_*` variables through `lookup`
    ///
    /// Absent variables leave the field unset; present but malformed ones
    /// are errors.
    pub fn from_env<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup(ENV_PORT)
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort(raw.clone()))
            })
            .transpose()?;

        Ok(Self {
            host: lookup(ENV_HOST),
            port,
            log_level: lookup(ENV_LOG_LEVEL).map(|v| v.parse()).transpose()?,
            environment: lookup(ENV_ENVIRONMENT).map(|v| v.parse()).transpose()?,
        })
    }
}

/// Command-line flags, before parsing
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Environment override
    pub environment: Option<String>,
}

impl CliArgs {
    /// Parse the flag values
    pub fn overrides(&self) -> Result<Overrides, ConfigError> {
        Ok(Overrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.as_deref().map(str::parse).transpose()?,
            environment: self.environment.as_deref().map(str::parse).transpose()?,
        })
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    config.apply(Overrides::from_env(lookup)?);
    config.apply(cli.overrides()?);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use optcalc_models::analytical::{CdfApproximation, IvSolverMode};
    use optcalc_models::open_interest::MaxPainConvention;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.calculator, CalculatorConfig::default());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!(" Warn ".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_environment_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("stage".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
        assert_eq!(Environment::Staging.to_string(), "staging");
    }

    #[test]
    fn test_validate_port() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort(_))));

        config.port = 65535;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_calculator_section() {
        let mut config = ServerConfig::default();
        config.calculator.maintenance_margin = 1.2;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Calculator(_)));
        assert!(err.to_string().contains("maintenance_margin"));
    }

    #[test]
    fn test_toml_with_calculator_table() {
        let toml_str = r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "DEBUG"
            environment = "prod"

            [calculator]
            cdf_approximation = "reference"
            iv_solver = "safeguarded"
            iv_max_iterations = 50
            max_pain_convention = "minimum_payout"
            maintenance_margin = 0.25
        "#;

        let config = ServerConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.calculator.cdf_approximation, CdfApproximation::Reference);
        assert_eq!(config.calculator.iv_solver, IvSolverMode::Safeguarded);
        assert_eq!(config.calculator.iv_max_iterations, 50);
        assert_eq!(
            config.calculator.max_pain_convention,
            MaxPainConvention::MinimumPayout
        );
        assert_eq!(config.calculator.maintenance_margin, 0.25);
        // Unspecified calculator fields keep their defaults
        assert_eq!(config.calculator.iv_tolerance, 1e-4);
        assert_eq!(config.calculator.iv_initial_guess, 0.20);
    }

    #[test]
    fn test_partial_toml() {
        let config = ServerConfig::from_toml_str("port = 9000").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.calculator, CalculatorConfig::default());
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(matches!(
            ServerConfig::from_toml_str(r#"log_level = "loud""#),
            Err(ConfigError::FileError(_))
        ));
        assert!(ServerConfig::from_toml_str("[calculator]\niv_solver = \"magic\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let overrides = Overrides::from_env(env_from(&[
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, " 7000 "),
            (ENV_LOG_LEVEL, "error"),
            (ENV_ENVIRONMENT, "staging"),
        ]))
        .unwrap();

        let mut config = ServerConfig::default();
        config.apply(overrides);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7000);
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.environment, Environment::Staging);
    }

    #[test]
    fn test_empty_env_changes_nothing() {
        let overrides = Overrides::from_env(env_from(&[])).unwrap();
        assert_eq!(overrides, Overrides::default());
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let err = Overrides::from_env(env_from(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = CliArgs {
            host: Some("192.168.1.1".to_string()),
            port: Some(9000),
            log_level: Some("debug".to_string()),
            environment: Some("prod".to_string()),
            config_file: None,
        };

        let mut config = ServerConfig::default();
        config.apply(cli.overrides().unwrap());
        assert_eq!(config.host, "192.168.1.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        let cli = CliArgs {
            log_level: Some("chatty".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            cli.overrides(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with_env(&CliArgs::default(), env_from(&[])).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_build_config_precedence() {
        let path = std::env::temp_dir().join(format!(
            "optcalc_server_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "host = \"10.0.0.1\"\nport = 5000\nlog_level = \"trace\"\n",
        )
        .unwrap();

        let cli = CliArgs {
            config_file: Some(path.clone()),
            port: Some(6000),
            ..Default::default()
        };
        let config =
            build_config_with_env(&cli, env_from(&[(ENV_LOG_LEVEL, "warn"), (ENV_PORT, "5500")]))
                .unwrap();
        std::fs::remove_file(&path).ok();

        // file < env < CLI
        assert_eq!(config.host, "10.0.0.1");
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.port, 6000);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/optcalc.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env_from(&[])),
            Err(ConfigError::FileError(_))
        ));
    }
}
