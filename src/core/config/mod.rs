mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config file not found: {0}")]
    ConfigFileNotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
