use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Could not find values for Atlantic.Net public_key and private_key.\n\
        They must be specified via either ini file, command line argument (--public_key and --private_key),\n\
        or environment variables (ANET_PUBLIC_KEY and ANET_PRIVATE_KEY)"
    )]
    MissingCredentials,

    #[error("Failed to read {}: {source}", path.display())]
    IniFile {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid value for '{key}' in INI file: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
