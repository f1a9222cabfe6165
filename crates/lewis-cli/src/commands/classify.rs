use crate::cli::ClassifyArgs;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::progress::batch_bar;
use lewisviz::{
    core::io::{elements::ElementTable, json::JsonFile, traits::MolecularFile},
    engine::classifier::compute_geometry,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result line for one classified file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub molecule: String,
    pub geometry: String,
    pub central_atom: String,
}

pub fn run(args: ClassifyArgs, quiet: bool) -> Result<()> {
    let data_manager = DataManager::new()?;
    let (elements, _) = data_manager.load_element_table(args.elements.as_deref())?;
    execute(&args.inputs, &elements, quiet)
}

fn execute(inputs: &[PathBuf], elements: &ElementTable, quiet: bool) -> Result<()> {
    info!("Classifying {} file(s).", inputs.len());
    let pb = batch_bar(inputs.len(), quiet);

    let results: Vec<(&PathBuf, Result<ClassifiedFile>)> = inputs
        .par_iter()
        .map(|path| {
            let result = classify_file(path, elements);
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(classified) => println!(
                "{}: {} ({}, central atom {})",
                path.display(),
                classified.geometry,
                classified.molecule,
                classified.central_atom
            ),
            Err(e) => {
                failed += 1;
                warn!("Failed to classify {:?}: {}", path, e);
                println!("{}: error: {}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

pub fn classify_file(path: &Path, elements: &ElementTable) -> Result<ClassifiedFile> {
    let molecule =
        JsonFile::read_from_path(path, elements).map_err(|e| CliError::parsing(path, e))?;
    let classification = compute_geometry(&molecule)?;
    let central_atom = molecule
        .atom(classification.central_atom)
        .map(|atom| format!("{}#{}", atom.name, atom.id))
        .unwrap_or_default();

    Ok(ClassifiedFile {
        molecule: molecule.name().to_string(),
        geometry: classification.geometry.to_string(),
        central_atom,
    })
}
