use crate::core::io::elements::ElementTable;
use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::{Atom, Hybridization};
use crate::core::models::builder::{MoleculeBuilder, MoleculeError};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondType;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed structure JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("Invalid molecule: {0}")]
    Molecule(#[from] MoleculeError),
    #[error("Structure '{0}' contains no atoms")]
    EmptyStructure(String),
    #[error("Atom {name}#{id}: element '{name}' is not in the element table")]
    UnknownElement { name: String, id: u32 },
    #[error("Atom {name}#{id}: invalid hybridization '{value}'")]
    InvalidHybridization {
        name: String,
        id: u32,
        value: String,
    },
    #[error("Atom {name}#{id}: invalid bond type '{value}'")]
    InvalidBondType {
        name: String,
        id: u32,
        value: String,
    },
    #[error("Atom {name}#{id}: bond partner {target_name}#{target_id} does not exist")]
    DanglingBond {
        name: String,
        id: u32,
        target_name: String,
        target_id: u32,
    },
}

/// Bond entry as written by the Lewis structure solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BondRecord {
    name: String,
    id: u32,
    bond_type: String,
}

/// Atom entry as written by the Lewis structure solver.
///
/// `valence` and `spd_orbitals` are solver bookkeeping; they are read for
/// completeness but the molecule keeps only what the geometry engine uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AtomRecord {
    name: String,
    #[serde(default)]
    valence: u32,
    lone: u32,
    id: u32,
    hybridization: String,
    #[serde(default)]
    bonds_with: Vec<BondRecord>,
    #[serde(default)]
    p_orbitals: Vec<u8>,
    #[serde(default)]
    spd_orbitals: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StructureRecord {
    name: String,
    atoms: Vec<AtomRecord>,
}

fn strip_spaces(s: &str) -> String {
    s.replace(' ', "")
}

/// Solver output format: one JSON object per molecule listing every atom with
/// its own bond entries.
pub struct JsonFile;

impl MolecularFile for JsonFile {
    type Context = ElementTable;
    type Error = JsonError;

    fn read_from(
        reader: &mut impl BufRead,
        elements: &ElementTable,
    ) -> Result<Molecule, Self::Error> {
        let record: StructureRecord = serde_json::from_reader(reader)?;
        if record.atoms.is_empty() {
            return Err(JsonError::EmptyStructure(record.name));
        }

        let mut builder = MoleculeBuilder::new(&record.name);
        let mut handles = Vec::with_capacity(record.atoms.len());

        for entry in &record.atoms {
            let name = strip_spaces(&entry.name);
            let proton_count =
                elements
                    .proton_count(&name)
                    .ok_or_else(|| JsonError::UnknownElement {
                        name: name.clone(),
                        id: entry.id,
                    })?;
            let hybridization = entry.hybridization.parse::<Hybridization>().map_err(|_| {
                JsonError::InvalidHybridization {
                    name: name.clone(),
                    id: entry.id,
                    value: entry.hybridization.clone(),
                }
            })?;

            let atom = Atom::new(&name, entry.id, proton_count, hybridization)
                .with_lone_electrons(entry.lone)
                .with_p_orbitals(entry.p_orbitals.len());
            handles.push(builder.add_atom(atom));
        }

        for (entry, &from) in record.atoms.iter().zip(&handles) {
            let name = strip_spaces(&entry.name);
            for bond in &entry.bonds_with {
                let target_name = strip_spaces(&bond.name);
                let to = builder.find_atom(&target_name, bond.id).ok_or_else(|| {
                    JsonError::DanglingBond {
                        name: name.clone(),
                        id: entry.id,
                        target_name: target_name.clone(),
                        target_id: bond.id,
                    }
                })?;
                let bond_type = bond.bond_type.parse::<BondType>().map_err(|_| {
                    JsonError::InvalidBondType {
                        name: name.clone(),
                        id: entry.id,
                        value: bond.bond_type.clone(),
                    }
                })?;
                builder.bond_entry(from, to, bond_type)?;
            }
        }

        let molecule = builder.build();
        debug!(
            name = molecule.name(),
            atoms = molecule.len(),
            "Read molecule from solver JSON"
        );
        Ok(molecule)
    }

    fn write_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), Self::Error> {
        let atoms = molecule
            .atoms()
            .map(|(id, atom)| {
                let bonds_with: Vec<BondRecord> = molecule
                    .bonds_of(id)
                    .iter()
                    .filter_map(|bond| {
                        molecule.atom(bond.other).map(|other| BondRecord {
                            name: other.name.clone(),
                            id: other.id,
                            bond_type: bond.bond_type.to_string(),
                        })
                    })
                    .collect();
                let sigma_bonds = molecule
                    .bonds_of(id)
                    .iter()
                    .filter(|bond| bond.bond_type == BondType::Sigma)
                    .count();

                let mut spd_orbitals = vec![2u8; sigma_bonds];
                spd_orbitals.extend(std::iter::repeat_n(2u8, atom.lone_pairs() as usize));

                AtomRecord {
                    name: atom.name.clone(),
                    valence: atom.lone_electrons + bonds_with.len() as u32,
                    lone: atom.lone_electrons,
                    id: atom.id,
                    hybridization: atom.hybridization.to_string().to_ascii_uppercase(),
                    bonds_with,
                    p_orbitals: vec![2u8; atom.p_orbital_count],
                    spd_orbitals,
                }
            })
            .collect();

        let record = StructureRecord {
            name: molecule.name().to_string(),
            atoms,
        };
        serde_json::to_writer_pretty(&mut *writer, &record)?;
        writeln!(writer)?;
        Ok(())
    }
}
