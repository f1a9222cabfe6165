use crate::error::{CliError, Result};
use directories::ProjectDirs;
use lewisviz::core::io::elements::ElementTable;
use std::fs::{self};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the element table inside the data directory.
pub const ELEMENTS_FILE: &str = "elements.csv";

/// Where an element table was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSource {
    File(PathBuf),
    Builtin,
}

impl ElementSource {
    pub fn log(&self, elements: &ElementTable) {
        match self {
            ElementSource::File(path) => {
                info!("Loaded {} elements from {:?}", elements.len(), path)
            }
            ElementSource::Builtin => info!("Using the built-in element table."),
        }
    }
}

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn with_custom_path(path: PathBuf) -> Self {
        Self { base_path: path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn element_table_path(&self) -> PathBuf {
        self.base_path.join(ELEMENTS_FILE)
    }

    /// Loads the element table, preferring an explicit file, then the one in
    /// the data directory, then the compiled-in table.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the data directory is not.
    pub fn load_element_table(
        &self,
        explicit: Option<&Path>,
    ) -> Result<(ElementTable, ElementSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Element table does not exist: {}", path.display()),
                )));
            }
            let table = ElementTable::load(path)?;
            return Ok((table, ElementSource::File(path.to_path_buf())));
        }

        let managed = self.element_table_path();
        if managed.exists() {
            let table = ElementTable::load(&managed)?;
            return Ok((table, ElementSource::File(managed)));
        }

        debug!(
            "No element table at {:?}, using the built-in table.",
            managed
        );
        Ok((ElementTable::builtin(), ElementSource::Builtin))
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let config_path = Self::get_path_config_file()?;
        Self::write_path_config(&config_path, path)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn write_path_config(config_path: &Path, data_path: &Path) -> Result<()> {
        let data_path = data_path.to_str().ok_or_else(|| {
            CliError::Argument(format!(
                "Data path is not valid UTF-8: {}",
                data_path.display()
            ))
        })?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Recording custom data path in {:?}", config_path);
        fs::write(config_path, data_path).map_err(CliError::from)
    }

    fn read_path_config(config_path: &Path) -> Result<Option<PathBuf>> {
        if !config_path.exists() {
            return Ok(None);
        }
        let custom_path_str = fs::read_to_string(config_path)?.trim().to_string();
        if custom_path_str.is_empty() {
            warn!("Custom path config file is empty, falling back to default path.");
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(custom_path_str)))
        }
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) => match Self::read_path_config(&config_path)? {
                Some(path) => Ok(path),
                None => Self::get_default_data_path(),
            },
            Err(_) => Self::get_default_data_path(),
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "lewisviz", "lewis")
    }

    fn get_path_config_file() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join("path.conf"))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
