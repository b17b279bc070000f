use std::path::{Path, PathBuf};

use crate::error::ClientError;

/// Origin used when no base URL is configured: the service on this machine.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_SIZE: usize = 24;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "BACKLOG_API_URL";
const ENV_PAGE_SIZE: &str = "BACKLOG_PAGE_SIZE";

/// Settings for reaching the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the service, without the `/api` suffix. `None` means the
    /// default origin.
    pub base_url: Option<String>,
    /// Games fetched per page.
    pub page_size: usize,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub page_size: ConfigSource,
    pub timeout_secs: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    remote: Option<RemoteSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct RemoteSection {
    base_url: Option<String>,
    page_size: Option<usize>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Load from environment variables, the default config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults. A missing or unreadable
    /// config file falls back to defaults with a warning.
    pub fn load() -> Result<Self, ClientError> {
        let section = config_path().and_then(|p| read_section_lenient(&p));
        Self::resolve(section, |var| std::env::var(var).ok())
    }

    /// Load from an explicit config file. Unlike [`ClientConfig::load`], a
    /// file that exists but cannot be parsed is an error. Environment
    /// overrides still apply.
    pub fn load_from(path: &Path) -> Result<Self, ClientError> {
        let section = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: ConfigFile = toml::from_str(&content).map_err(|e| {
                ClientError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            file.remote
        } else {
            None
        };
        Self::resolve(section, |var| std::env::var(var).ok())
    }

    fn resolve(
        section: Option<RemoteSection>,
        env: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let section = section.unwrap_or_default();

        let base_url = env(ENV_API_URL)
            .or(section.base_url)
            .and_then(normalize_base_url);

        let page_size = match env(ENV_PAGE_SIZE) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ClientError::Config(format!("{ENV_PAGE_SIZE} is not a number: '{raw}'"))
            })?,
            None => section.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };

        let config = Self {
            base_url,
            page_size,
            timeout_secs: section.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply explicit values (e.g. from CLI flags) over the loaded ones.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        page_size: Option<usize>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(url);
        }
        if let Some(size) = page_size {
            self.page_size = size;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.page_size == 0 {
            return Err(ClientError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured origin, or [`DEFAULT_ORIGIN`].
    pub fn origin(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }

    /// `<origin>/api`
    pub fn api_root(&self) -> String {
        format!("{}/api", self.origin().trim_end_matches('/'))
    }
}

/// Blank means "not configured"; trailing slashes are dropped.
fn normalize_base_url(raw: String) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("backlog").join("config.toml"))
}

/// Save the config to the default config file, creating parent directories
/// as needed. Returns the path the file was written to.
pub fn save_to_file(config: &ClientConfig) -> Result<PathBuf, ClientError> {
    let path = config_path().ok_or_else(|| {
        ClientError::Config("Could not determine config directory".to_string())
    })?;
    save_to(&path, config)?;
    Ok(path)
}

/// Save the config to `path`. Defaults are left out of the file so later
/// changes to them take effect.
pub fn save_to(path: &Path, config: &ClientConfig) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = ConfigFile {
        remote: Some(RemoteSection {
            base_url: config.base_url.clone(),
            page_size: (config.page_size != DEFAULT_PAGE_SIZE).then_some(config.page_size),
            timeout_secs: (config.timeout_secs != DEFAULT_TIMEOUT_SECS)
                .then_some(config.timeout_secs),
        }),
    };

    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| ClientError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let section = config_path().and_then(|p| read_section_lenient(&p));
    sources_from(section.as_ref(), |var| std::env::var(var).is_ok())
}

fn sources_from(
    section: Option<&RemoteSection>,
    env_set: impl Fn(&'static str) -> bool,
) -> ConfigSources {
    let base_url = if env_set(ENV_API_URL) {
        ConfigSource::EnvVar(ENV_API_URL)
    } else if section.and_then(|s| s.base_url.as_ref()).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };

    let page_size = if env_set(ENV_PAGE_SIZE) {
        ConfigSource::EnvVar(ENV_PAGE_SIZE)
    } else if section.and_then(|s| s.page_size).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };

    let timeout_secs = if section.and_then(|s| s.timeout_secs).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };

    ConfigSources {
        base_url,
        page_size,
        timeout_secs,
    }
}

fn read_section_lenient(path: &Path) -> Option<RemoteSection> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => file.remote,
        Err(e) => {
            log::warn!("Failed to parse config at {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &'static str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = ClientConfig::resolve(None, no_env).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_root(), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn env_overrides_file() {
        let section = RemoteSection {
            base_url: Some("http://file.example".to_string()),
            page_size: Some(50),
            timeout_secs: None,
        };
        let config = ClientConfig::resolve(Some(section), |var| match var {
            ENV_API_URL => Some("http://env.example/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://env.example"));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn blank_url_means_default_origin() {
        let config = ClientConfig::resolve(None, |var| match var {
            ENV_API_URL => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, None);
        assert_eq!(config.origin(), DEFAULT_ORIGIN);
    }

    #[test]
    fn bad_page_size_env_is_rejected() {
        let result = ClientConfig::resolve(None, |var| match var {
            ENV_PAGE_SIZE => Some("lots".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ClientError::Config(_))));

        let result = ClientConfig::resolve(None, |var| match var {
            ENV_PAGE_SIZE => Some("0".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn overrides_win() {
        let config = ClientConfig::default().with_overrides(
            Some("https://shelf.example/".to_string()),
            Some(50),
            None,
        );
        assert_eq!(config.api_root(), "https://shelf.example/api");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ClientConfig {
            base_url: Some("http://nas.local:8000".to_string()),
            page_size: 40,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        save_to(&path, &config).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[remote]"));
        assert!(!written.contains("timeout_secs"));

        let file: ConfigFile = toml::from_str(&written).unwrap();
        let loaded = ClientConfig::resolve(file.remote, no_env).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[remote\nbase_url = ").unwrap();
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn sources_report_provenance() {
        let section = RemoteSection {
            base_url: None,
            page_size: Some(12),
            timeout_secs: None,
        };
        let sources = sources_from(Some(&section), |var| var == ENV_API_URL);
        assert_eq!(sources.base_url, ConfigSource::EnvVar(ENV_API_URL));
        assert_eq!(sources.page_size, ConfigSource::ConfigFile);
        assert_eq!(sources.timeout_secs, ConfigSource::Default);
    }
}
