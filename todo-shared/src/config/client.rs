use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use url::Url;

/// Hosted backend the client talks to unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://todo-website-backend.onrender.com/api";

/// Log level used when neither the config file nor the environment sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const ENV_BASE_URL: &str = "TODO_BASE_URL";
const ENV_SESSION_PATH: &str = "TODO_SESSION_PATH";
const ENV_LOG_LEVEL: &str = "TODO_LOG_LEVEL";

/// Errors raised while loading or writing a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one of `yaml`, `yml`, `json` or `toml`.
    #[error("unsupported configuration format for {}; use yaml, json or toml", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The file contents did not parse.
    #[error("invalid configuration in {}: {message}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The base URL is malformed or not http(s).
    #[error("invalid base URL `{value}`: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Rendering a configuration file failed.
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),
}

/// Runtime settings for the todo client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the backend REST API, e.g. `https://host/api`.
    pub base_url: Url,

    /// Where the session token is persisted; `None` selects the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,

    /// Logging level used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    ///
    /// # Panics
    /// Never; [`DEFAULT_BASE_URL`] is a valid URL.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            session_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
    /// the resolved base URL is not an http(s) URL.
    pub fn load_config(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_config_with(config_path, |key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::load_config`] with an explicit environment lookup.
    ///
    /// # Errors
    /// See [`ClientConfig::load_config`].
    pub fn load_config_with<F>(config_path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };
        let defaults = Self::with_defaults();

        // Environment only fills values the file left at their defaults.
        if config.base_url == defaults.base_url
            && let Some(value) = lookup(ENV_BASE_URL)
        {
            config.base_url = parse_base_url(&value)?;
        }
        if config.session_path.is_none()
            && let Some(value) = lookup(ENV_SESSION_PATH).filter(|value| !value.is_empty())
        {
            config.session_path = Some(PathBuf::from(value));
        }
        if config.log_level == defaults.log_level
            && let Some(value) = lookup(ENV_LOG_LEVEL)
        {
            config.log_level = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file whose format is chosen by extension.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if reading or parsing fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        format.parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Checks that the base URL can carry REST paths.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] for non-http(s) schemes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scheme(&self.base_url)
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    check_scheme(&url)?;
    Ok(url)
}

fn check_scheme(url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidBaseUrl {
            value: url.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

/// Serialization formats accepted for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, `.yaml` or `.yml`.
    Yaml,
    /// JSON, `.json`.
    Json,
    /// TOML, `.toml`.
    Toml,
}

impl ConfigFormat {
    /// Chooses a format from a file extension.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// File name used when generating a config of this format.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Yaml => "config.yaml",
            Self::Json => "config.json",
            Self::Toml => "config.toml",
        }
    }

    /// Renders `config` in this format.
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] if the serializer fails.
    pub fn render(self, config: &ClientConfig) -> Result<String, ConfigError> {
        let rendered = match self {
            Self::Yaml => serde_yml::to_string(config).map_err(|err| err.to_string()),
            Self::Json => serde_json::to_string_pretty(config).map_err(|err| err.to_string()),
            Self::Toml => toml::to_string_pretty(config).map_err(|err| err.to_string()),
        };
        rendered.map_err(ConfigError::Serialize)
    }

    fn parse(self, content: &str) -> Result<ClientConfig, String> {
        match self {
            Self::Yaml => serde_yml::from_str(content).map_err(|err| err.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|err| err.to_string()),
            Self::Toml => toml::from_str(content).map_err(|err| err.to_string()),
        }
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(format!("unsupported format `{other}`; use yaml, json or toml")),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        })
    }
}
