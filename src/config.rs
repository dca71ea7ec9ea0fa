use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::clients::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS};

const MIN_TIMEOUT_MS: u64 = 1_000;
const MAX_TIMEOUT_MS: u64 = 120_000;

/// Main configuration structure loaded from digital_twin.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
    /// File the settings were read from; `None` means built-in defaults
    #[serde(skip)]
    pub source: Option<String>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub http_bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

/// Completion service selection and Gemini settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionConfig {
    /// "gemini" or "offline"
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Input checks beyond JSON shape
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Reject negative hours and mood outside 1-5 with 422
    pub strict: bool,
}

/// Runtime configuration loaded from environment variables
#[derive(Clone)]
pub struct RuntimeConfig {
    pub gemini_api_key: Option<String>,
    pub log_level: String,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            log_level: "digital_twin=info,tower_http=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses DIGITAL_TWIN_CONFIG environment variable or defaults to "digital_twin.toml"
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(None)
    }

    /// Like [`Config::load`], with an explicit config file path taking precedence
    pub fn load_with(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load environment variables with fallbacks:
        // 1) TWIN_ENV_FILE if set
        // 2) ./.env
        // 3) ../.env (repo root when running from a subdirectory)
        if let Ok(env_path) = std::env::var("TWIN_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
            if std::env::var("GEMINI_API_KEY").is_err() {
                let _ = dotenvy::from_path("../.env");
            }
        }

        // An explicitly named file must exist; the env/default path may be absent
        match config_path {
            Some(path) => Self::load_from_path(path, true),
            None => {
                let path = std::env::var("DIGITAL_TWIN_CONFIG")
                    .unwrap_or_else(|_| "digital_twin.toml".to_string());
                Self::load_from_path(&path, false)
            }
        }
    }

    /// Same as [`Config::load`] without the dotenv step.
    ///
    /// A missing file yields defaults unless `required`; any other read
    /// failure is an error.
    pub fn load_from_path(config_path: &str, required: bool) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut config: Config = match std::fs::read_to_string(config_path) {
            Ok(content) => {
                let mut config: Config = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {config_path}"))?;
                config.source = Some(config_path.to_string());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Self::default(),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to read config file {config_path}")));
            }
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TWIN_HTTP_BIND") {
            match v.parse::<SocketAddr>() {
                Ok(bind) => self.server.http_bind = bind,
                Err(_) => tracing::warn!("Ignoring invalid TWIN_HTTP_BIND '{}'", v),
            }
        }
        if let Some(strict) = env_flag("TWIN_STRICT_VALIDATION") {
            self.validation.strict = strict;
        }
        if let Ok(provider) = std::env::var("TWIN_COMPLETION_PROVIDER") {
            self.completion.provider = provider;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.completion.model = model;
        }
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            self.completion.base_url = url;
        }
        if let Some(timeout) = std::env::var("GEMINI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.completion.timeout_ms = timeout;
        }
    }

    /// Clamp out-of-range values and warn about unknown settings
    pub fn validate(&mut self) {
        let clamped = self.completion.timeout_ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);
        if clamped != self.completion.timeout_ms {
            tracing::warn!(
                "completion timeout {}ms outside {}-{}ms, clamping to {}ms",
                self.completion.timeout_ms,
                MIN_TIMEOUT_MS,
                MAX_TIMEOUT_MS,
                clamped
            );
            self.completion.timeout_ms = clamped;
        }

        self.completion.provider = self.completion.provider.trim().to_lowercase();
        match self.completion.provider.as_str() {
            "gemini" | "offline" => {}
            other => {
                tracing::warn!("Unknown completion provider '{}', using gemini", other);
                self.completion.provider = "gemini".to_string();
            }
        }

        if !self.completion.base_url.starts_with("http://")
            && !self.completion.base_url.starts_with("https://")
        {
            tracing::warn!(
                "Completion base URL '{}' doesn't start with http:// or https://",
                self.completion.base_url
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.http_bind.port(), 8000);
        assert_eq!(config.completion.provider, "gemini");
        assert_eq!(config.completion.model, "gemini-2.5-flash");
        assert!(!config.validation.strict);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [validation]
            strict = true

            [completion]
            provider = "offline"
            model = "gemini-2.5-pro"
            base_url = "http://localhost:1234"
            timeout_ms = 5000
            "#,
        )
        .unwrap();
        assert!(config.validation.strict);
        assert_eq!(config.completion.provider, "offline");
        assert_eq!(config.completion.timeout_ms, 5000);
        assert_eq!(config.server.http_bind.port(), 8000);
    }

    #[test]
    fn test_validate_clamps_and_normalizes() {
        let mut config = Config::default();
        config.completion.timeout_ms = 10;
        config.completion.provider = " OFFLINE ".to_string();
        config.validate();
        assert_eq!(config.completion.timeout_ms, MIN_TIMEOUT_MS);
        assert_eq!(config.completion.provider, "offline");

        config.completion.timeout_ms = 10_000_000;
        config.completion.provider = "openai".to_string();
        config.validate();
        assert_eq!(config.completion.timeout_ms, MAX_TIMEOUT_MS);
        assert_eq!(config.completion.provider, "gemini");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from_path("/nonexistent/digital_twin.toml", false).unwrap();
        assert!(!config.completion.base_url.is_empty());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_missing_required_file_fails() {
        let err = Config::load_from_path("/nonexistent/digital_twin.toml", true).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/digital_twin.toml"));
    }

    #[test]
    fn test_unreadable_file_fails_even_when_optional() {
        // A directory exists but can't be read as a file
        let dir = std::env::temp_dir();
        let path = dir.to_str().unwrap();
        assert!(Config::load_from_path(path, false).is_err());
        assert!(Config::load_from_path(path, true).is_err());
    }

    #[test]
    fn test_existing_file_is_recorded_as_source() {
        let path = std::env::temp_dir().join(format!("digital_twin_{}.toml", std::process::id()));
        std::fs::write(&path, "[validation]\nstrict = true\n").unwrap();
        let path_str = path.to_str().unwrap();

        let config = Config::load_from_path(path_str, true);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();
        assert_eq!(config.source.as_deref(), Some(path_str));
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let runtime = RuntimeConfig {
            gemini_api_key: Some("AIza-secret".into()),
            ..RuntimeConfig::default()
        };
        let debug = format!("{:?}", runtime);
        assert!(!debug.contains("AIza-secret"));
    }
}
