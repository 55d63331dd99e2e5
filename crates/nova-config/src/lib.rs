use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Once;

use thiserror::Error;

mod schema;

pub use schema::json_schema;

/// Tracing target used by the configuration layer itself.
pub const CONFIG_TARGET: &str = "nova.config";

/// Well-known root types the resolver must be able to look up before it can
/// resolve anything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Universal base type; its ancestor list is always empty.
    #[serde(default = "ResolutionConfig::default_object_type")]
    pub object_type: String,

    /// Implicit, non-overridable superclass of every record declaration.
    #[serde(default = "ResolutionConfig::default_record_base_type")]
    pub record_base_type: String,

    /// Implicit superclass of every enum declaration (parameterized by the enum).
    #[serde(default = "ResolutionConfig::default_enum_base_type")]
    pub enum_base_type: String,

    /// Implicit superinterface of every annotation type.
    #[serde(default = "ResolutionConfig::default_annotation_base_type")]
    pub annotation_base_type: String,
}

impl ResolutionConfig {
    fn default_object_type() -> String {
        "java.lang.Object".to_owned()
    }

    fn default_record_base_type() -> String {
        "java.lang.Record".to_owned()
    }

    fn default_enum_base_type() -> String {
        "java.lang.Enum".to_owned()
    }

    fn default_annotation_base_type() -> String {
        "java.lang.annotation.Annotation".to_owned()
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            object_type: Self::default_object_type(),
            record_base_type: Self::default_record_base_type(),
            enum_base_type: Self::default_enum_base_type(),
            annotation_base_type: Self::default_annotation_base_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level for all Nova crates.
    ///
    /// Either a simple level (`info`, `debug`, ...) or a full `EnvFilter`
    /// directive string such as `nova.resolve=trace,info`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// Create the effective `EnvFilter`.
    ///
    /// If `RUST_LOG` is set, it is merged into the configured directives.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct NovaConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl NovaConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            target: CONFIG_TARGET,
            path = %path.display(),
            "loaded config file"
        );
        Ok(config)
    }
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging on stderr.
///
/// This function is safe to call multiple times; only the first call installs a
/// global subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(config.env_filter())
            .with_writer(std::io::stderr);
        let installed = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        // Another subscriber may already be installed (e.g. by a test harness).
        if installed.is_err() {
            tracing::debug!(target: CONFIG_TARGET, "global tracing subscriber already set");
        }
    });
}
