pub mod app_config;
pub mod catalog;
pub mod config;
pub mod shops;

pub use app_config::AppConfig;
pub use catalog::{CatalogSnapshot, Price, Product};
pub use config::{load_app_config, load_app_config_from_env};
pub use shops::{load_shops, SelectorConfig, ShopConfig, ShopsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read shops file {path}: {source}")]
    ShopsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shops file: {0}")]
    ShopsFileParse(#[from] serde_yaml::Error),

    #[error("shop configuration invalid: {0}")]
    Validation(String),
}
