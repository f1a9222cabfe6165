use crate::cli::LayoutArgs;
use crate::config::PartialLayoutConfig;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use lewisviz::{
    core::io::{elements::ElementTable, json::JsonFile, scene::SceneFile, traits::MolecularFile},
    core::models::molecule::Molecule,
    engine::progress::ProgressReporter,
    workflows::{self, layout::Layout},
};
use tracing::info;

pub fn run(args: LayoutArgs, quiet: bool) -> Result<()> {
    info!("Initializing data manager...");
    let data_manager = DataManager::new()?;
    let (elements, source) = data_manager.load_element_table(args.elements.as_deref())?;
    source.log(&elements);

    execute(&args, &elements, quiet)
}

fn execute(args: &LayoutArgs, elements: &ElementTable, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialLayoutConfig::from_file(path)?,
        None => PartialLayoutConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(args)?;

    info!("Loading input structure from {:?}", &args.input);
    let molecule = JsonFile::read_from_path(&args.input, elements)
        .map_err(|e| CliError::parsing(&args.input, e))?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let layout = workflows::layout::run(&molecule, &config, &reporter)?;
    let instances = layout.instances(&config);
    info!(
        nuclei = instances.nuclei.len(),
        lobes = instances.lobe_count(),
        "Render instances generated."
    );

    print_summary(&molecule, &layout)?;

    if let Some(output) = &args.output {
        let scene = layout.to_scene(&molecule)?;
        SceneFile::write_to_path(&scene, output)?;
        println!("✓ Scene written to: {}", output.display());
    }
    Ok(())
}

fn print_summary(molecule: &Molecule, layout: &Layout) -> Result<()> {
    let central = layout.classification.central_atom;
    let central_atom = molecule
        .atom(central)
        .ok_or(lewisviz::engine::error::EngineError::UnknownAtom { atom: central })?;

    println!("Molecule:  {}", molecule.name());
    println!("Geometry:  {}", layout.classification.geometry);
    println!("Central:   {}#{}", central_atom.name, central_atom.id);
    println!();
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>6}",
        "Atom", "x", "y", "z", "Lobes"
    );
    for placed in &layout.atoms {
        let Some(atom) = molecule.atom(placed.placement.atom) else {
            continue;
        };
        let p = placed.placement.position;
        println!(
            "{:<8} {:>10.4} {:>10.4} {:>10.4} {:>6}",
            format!("{}#{}", atom.name, atom.id),
            p.x,
            p.y,
            p.z,
            placed.orbitals.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CentralizeFlag;
    use lewisviz::core::io::scene::Scene;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const CO2_JSON: &str = r#"{
      "name": "CO2",
      "atoms": [
        { "name": "C", "lone": 0, "id": 0, "hybridization": "SP",
          "bonds_with": [
            { "name": "O", "id": 0, "bond_type": "SIGMA" },
            { "name": "O", "id": 0, "bond_type": "PI" },
            { "name": "O", "id": 1, "bond_type": "SIGMA" },
            { "name": "O", "id": 1, "bond_type": "PI" }
          ],
          "p_orbitals": [2, 2] },
        { "name": "O", "lone": 4, "id": 0, "hybridization": "SP2",
          "bonds_with": [
            { "name": "C", "id": 0, "bond_type": "SIGMA" },
            { "name": "C", "id": 0, "bond_type": "PI" }
          ],
          "p_orbitals": [2] },
        { "name": "O", "lone": 4, "id": 1, "hybridization": "SP2",
          "bonds_with": [
            { "name": "C", "id": 0, "bond_type": "SIGMA" },
            { "name": "C", "id": 0, "bond_type": "PI" }
          ],
          "p_orbitals": [2] }
      ]
    }"#;

    fn args(input: &Path, output: Option<PathBuf>) -> LayoutArgs {
        LayoutArgs {
            input: input.to_path_buf(),
            output,
            config: None,
            elements: None,
            centralize: CentralizeFlag {
                centralize: false,
                no_centralize: false,
            },
            set_values: vec![],
        }
    }

    #[test]
    fn layout_writes_scene_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("co2.json");
        let output = dir.path().join("co2.scene.json");
        fs::write(&input, CO2_JSON).unwrap();

        execute(
            &args(&input, Some(output.clone())),
            &ElementTable::builtin(),
            true,
        )
        .unwrap();

        let scene: Scene = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(scene.name, "CO2");
        assert_eq!(scene.geometry, "linear");
        assert_eq!(scene.central_atom.name, "C");
        assert_eq!(scene.atoms.len(), 3);
        assert_eq!(scene.atoms[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn unreadable_structure_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, "{ not json").unwrap();

        let result = execute(&args(&input, None), &ElementTable::builtin(), true);
        assert!(matches!(result, Err(CliError::FileParsing { path, .. }) if path == input));
    }

    #[test]
    fn config_file_errors_surface_before_reading_input() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("layout.toml");
        fs::write(&config, "[scale]\np-orbital = -2.0\n").unwrap();
        let mut layout_args = args(&dir.path().join("missing.json"), None);
        layout_args.config = Some(config);

        let result = execute(&layout_args, &ElementTable::builtin(), true);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
