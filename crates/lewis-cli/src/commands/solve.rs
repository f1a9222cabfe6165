use crate::cli::SolveArgs;
use crate::data::DataManager;
use crate::error::Result;
use lewisviz::{
    core::io::{elements::ElementTable, json::JsonFile, traits::MolecularFile},
    core::models::molecule::Molecule,
    engine::solver::solve,
};
use std::io;
use tracing::info;

pub fn run(args: SolveArgs) -> Result<()> {
    let data_manager = DataManager::new()?;
    let (elements, source) = data_manager.load_element_table(args.elements.as_deref())?;
    source.log(&elements);

    let molecule = execute(&args, &elements)?;
    if args.output.is_some() {
        print_summary(&molecule);
    }
    Ok(())
}

fn execute(args: &SolveArgs, elements: &ElementTable) -> Result<Molecule> {
    info!("Solving {} with charge {}", args.formula, args.charge);
    let molecule = solve(&args.formula, args.charge, elements)?;

    match &args.output {
        Some(path) => {
            JsonFile::write_to_path(&molecule, path)?;
            println!("✓ Structure written to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            JsonFile::write_to(&molecule, &mut stdout)?;
        }
    }
    Ok(molecule)
}

fn print_summary(molecule: &Molecule) {
    println!();
    println!(
        "{:<8} {:<8} {:>5} {:>3}  Bonds",
        "Atom", "Hybrid", "Lone", "p"
    );
    for (id, atom) in molecule.atoms() {
        let bonds: Vec<String> = molecule
            .bonds_of(id)
            .iter()
            .filter_map(|bond| {
                let other = molecule.atom(bond.other)?;
                Some(format!("{}#{} {}", other.name, other.id, bond.bond_type))
            })
            .collect();
        println!(
            "{:<8} {:<8} {:>5} {:>3}  {}",
            format!("{}#{}", atom.name, atom.id),
            atom.hybridization,
            atom.lone_electrons,
            atom.p_orbital_count,
            bonds.join(", ")
        );
    }
}
