use lewisviz::core::io::elements::ElementTableError;
use lewisviz::core::io::json::JsonError;
use lewisviz::core::io::scene::SceneError;
use lewisviz::engine::config::ConfigError;
use lewisviz::engine::error::EngineError;
use lewisviz::engine::solver::SolverError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data management error: {0}")]
    Data(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not solve the structure: {0}")]
    Solver(#[from] SolverError),

    #[error("Structure file error: {0}")]
    Structure(#[from] JsonError),

    #[error("Element table error: {0}")]
    Elements(#[from] ElementTableError),

    #[error("Failed to write scene: {0}")]
    Scene(#[from] SceneError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("{failed} of {total} molecule(s) could not be classified")]
    BatchFailed { failed: usize, total: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    /// Wraps a structure-file error with the path it came from.
    pub fn parsing(path: impl Into<PathBuf>, source: JsonError) -> Self {
        CliError::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }
}
