use crate::cli::{DataArgs, DataCommands};
use crate::data::{DataManager, ElementSource};
use crate::error::{CliError, Result};
use std::path::PathBuf;
use tracing::info;

pub fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path()?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    let path = manager.get_data_path();
    info!("Current data path: {:?}", path);
    println!("{}", path.display());

    match manager.load_element_table(None)? {
        (table, ElementSource::File(file)) => {
            println!("Element table: {} ({} elements)", file.display(), table.len());
        }
        (table, ElementSource::Builtin) => {
            println!(
                "Element table: built-in ({} elements); place {} in the data path to override it",
                table.len(),
                crate::data::ELEMENTS_FILE
            );
        }
    }
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    if !path.is_absolute() {
        return Err(CliError::Argument(format!(
            "Path must be absolute, got: {}",
            path.display()
        )));
    }
    DataManager::set_custom_path(&path)?;
    println!("✓ Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    println!(
        "✓ Data path reset to default: {}",
        manager.get_data_path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_path_rejects_relative_paths() {
        let result = handle_set_path(PathBuf::from("relative/data"));
        assert!(matches!(result, Err(CliError::Argument(msg)) if msg.contains("absolute")));
    }
}
