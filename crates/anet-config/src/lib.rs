pub mod error;

pub use error::*;

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the INI file holding the settings
pub const INI_FILE: &str = "anet_inventory.ini";

/// Section of the INI file the settings live in
pub const INI_SECTION: &str = "atlantic_net";

pub const ENV_INI_PATH: &str = "ANET_INI_PATH";
pub const ENV_PUBLIC_KEY: &str = "ANET_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "ANET_PRIVATE_KEY";

pub const DEFAULT_CACHE_PATH: &str = ".";
pub const DEFAULT_CACHE_MAX_AGE: u64 = 0;

/// Atlantic.Net API key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

/// Fully resolved settings, built once per run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub credentials: Credentials,
    pub cache_path: PathBuf,
    /// Maximum cache age in seconds
    pub cache_max_age: u64,
    /// Variables attached to the `all` group
    pub group_variables: Map<String, Value>,
}

impl Settings {
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age)
    }
}

/// Settings from a single source; unset fields defer to lower layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsLayer {
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub cache_path: Option<PathBuf>,
    pub cache_max_age: Option<u64>,
    pub group_variables: Option<Map<String, Value>>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl SettingsLayer {
    /// Read the `[atlantic_net]` section of an INI file
    pub fn from_ini(path: &Path) -> Result<Self> {
        let ini_error = |source| ConfigError::IniFile {
            path: path.to_path_buf(),
            source,
        };

        let ini = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Ini))
            .build()
            .map_err(ini_error)?;

        let get = |name: &str| -> Result<Option<String>> {
            match ini.get_string(&format!("{}.{}", INI_SECTION, name)) {
                Ok(value) => Ok(non_empty(value)),
                Err(config::ConfigError::NotFound(_)) => Ok(None),
                Err(e) => Err(ini_error(e)),
            }
        };

        let cache_max_age = get("cache_max_age")?
            .map(|value| {
                value.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                    key: "cache_max_age".to_string(),
                    reason: format!("'{}': {}", value, e),
                })
            })
            .transpose()?;

        let group_variables = get("group_variables")?
            .map(|value| {
                serde_json::from_str::<Map<String, Value>>(&value).map_err(|e| {
                    ConfigError::InvalidValue {
                        key: "group_variables".to_string(),
                        reason: format!("expected a JSON object: {}", e),
                    }
                })
            })
            .transpose()?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(Self {
            public_key: get("public_key")?,
            private_key: get("private_key")?,
            cache_path: get("cache_path")?.map(PathBuf::from),
            cache_max_age,
            group_variables,
        })
    }

    /// Read credentials from `ANET_PUBLIC_KEY` / `ANET_PRIVATE_KEY`
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().and_then(non_empty);
        Self {
            public_key: var(ENV_PUBLIC_KEY),
            private_key: var(ENV_PRIVATE_KEY),
            ..Self::default()
        }
    }

    /// Overlay `higher` on top of this layer
    pub fn merge(self, higher: SettingsLayer) -> Self {
        Self {
            public_key: higher.public_key.or(self.public_key),
            private_key: higher.private_key.or(self.private_key),
            cache_path: higher.cache_path.or(self.cache_path),
            cache_max_age: higher.cache_max_age.or(self.cache_max_age),
            group_variables: higher.group_variables.or(self.group_variables),
        }
    }

    /// Fill in defaults; both keys have to be present by now
    pub fn resolve(self) -> Result<Settings> {
        let (Some(public_key), Some(private_key)) = (self.public_key, self.private_key) else {
            return Err(ConfigError::MissingCredentials);
        };

        Ok(Settings {
            credentials: Credentials {
                public_key,
                private_key,
            },
            cache_path: self
                .cache_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH)),
            cache_max_age: self.cache_max_age.unwrap_or(DEFAULT_CACHE_MAX_AGE),
            group_variables: self.group_variables.unwrap_or_default(),
        })
    }
}

/// Find the INI file
///
/// Search order:
/// 1. Environment variable ANET_INI_PATH
/// 2. Current directory
/// 3. Directory of the running executable
/// 4. ~/.config/anet-inventory/anet_inventory.ini
pub fn find_ini_file() -> Option<PathBuf> {
    if let Ok(ini_path) = std::env::var(ENV_INI_PATH) {
        let path = PathBuf::from(ini_path);
        if path.is_file() {
            return Some(path);
        }
        tracing::warn!("{} points to a missing file: {}", ENV_INI_PATH, path.display());
    }

    let mut candidates = Vec::new();
    if let Ok(current_dir) = std::env::current_dir() {
        candidates.push(current_dir.join(INI_FILE));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(INI_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("anet-inventory").join(INI_FILE));
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Merge the INI file, the environment and `cli`, in increasing priority
pub fn load_settings(cli: SettingsLayer) -> Result<Settings> {
    let ini = match find_ini_file() {
        Some(path) => SettingsLayer::from_ini(&path)?,
        None => {
            tracing::debug!("No {} found", INI_FILE);
            SettingsLayer::default()
        }
    };

    ini.merge(SettingsLayer::from_env()).merge(cli).resolve()
}
