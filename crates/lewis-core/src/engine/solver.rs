use crate::core::io::elements::{ElementData, ElementTable};
use crate::core::models::atom::{Atom, Hybridization};
use crate::core::models::builder::{MoleculeBuilder, MoleculeError};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondType;
use std::collections::HashMap;
use std::iter;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("Formula is empty")]
    EmptyFormula,

    #[error("Unexpected '{found}' at position {position} of formula '{formula}'")]
    InvalidFormula {
        formula: String,
        position: usize,
        found: char,
    },

    #[error("Count for element '{symbol}' must be a positive integer")]
    InvalidCount { symbol: String },

    #[error("Unknown element '{symbol}'")]
    UnknownElement { symbol: String },

    #[error("{name}#{id} cannot be bonded to the central atom at any hybridization")]
    Unbondable { name: String, id: u32 },

    #[error("{name}#{id} cannot change hybridization from {hybridization}")]
    HybridizationLimit {
        name: String,
        id: u32,
        hybridization: Hybridization,
    },

    #[error(transparent)]
    Molecule(#[from] MoleculeError),
}

/// Splits a formula such as `"C2H6"` into `(symbol, count)` pairs.
///
/// A symbol is one upper-case letter followed by any lower-case letters; a
/// missing count means 1. Groups in parentheses are not supported.
pub fn parse_formula(formula: &str) -> Result<Vec<(String, u32)>, SolverError> {
    let formula = formula.trim();
    if formula.is_empty() {
        return Err(SolverError::EmptyFormula);
    }

    let mut parts = Vec::new();
    let mut chars = formula.char_indices().peekable();
    while let Some((position, first)) = chars.next() {
        if !first.is_ascii_uppercase() {
            return Err(SolverError::InvalidFormula {
                formula: formula.to_string(),
                position,
                found: first,
            });
        }
        let mut symbol = first.to_string();
        while let Some((_, lower)) = chars.next_if(|&(_, c)| c.is_ascii_lowercase()) {
            symbol.push(lower);
        }
        let mut digits = String::new();
        while let Some((_, digit)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
            digits.push(digit);
        }

        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .ok()
                .filter(|&count| count > 0)
                .ok_or_else(|| SolverError::InvalidCount {
                    symbol: symbol.clone(),
                })?
        };
        parts.push((symbol, count));
    }
    Ok(parts)
}

/// Builds the Lewis structure of `formula` carrying the given net charge.
///
/// Every other atom is bonded to a single central atom, the least
/// electronegative one that is not hydrogen. The steps are:
///
/// 1. Sigma bonds to the central atom, raising its hybridization until every
///    other atom is bonded.
/// 2. Half-filled hybrid orbitals left over on any atom become p orbitals.
/// 3. Pi bonds pair the central atom's unpaired p electrons with those of
///    the other atoms.
/// 4. The charge adds (negative) or removes (positive) one unpaired electron
///    per unit.
/// 5. Unpaired electrons left on other atoms are completed into lone pairs,
///    the central atom giving up a hybrid orbital for a new pi bond each
///    time.
///
/// The molecule is named `"{formula}_{charge}"` and lists every bond in both
/// directions.
///
/// # Errors
///
/// Returns a [`SolverError`] for malformed formulas, unknown elements, and
/// structures that would need a hybridization outside `s`..`sp3d5`.
#[instrument(skip(elements))]
pub fn solve(
    formula: &str,
    charge: i32,
    elements: &ElementTable,
) -> Result<Molecule, SolverError> {
    let mut draft = Draft::new(formula, elements)?;
    debug!(central = %draft.atoms[draft.central].label(), "Chose central atom");

    draft.bond_sigma()?;
    draft.demote_half_filled_hybrids();
    draft.bond_pi();
    draft.apply_charge(charge)?;
    draft.pair_remaining_electrons()?;

    draft.into_molecule(&format!("{}_{}", formula.trim(), charge))
}

/// An atom while its bonds are being worked out.
#[derive(Debug, Clone)]
struct DraftAtom {
    symbol: String,
    id: u32,
    element: ElementData,
    valence: u32,
    lone: u32,
    hybridization: Hybridization,
    /// Electrons in each hybrid orbital.
    hybrid: Vec<u8>,
    /// Electrons in each unhybridized p orbital.
    p: Vec<u8>,
    bonds: Vec<(usize, BondType)>,
}

impl DraftAtom {
    fn new(symbol: &str, id: u32, element: ElementData) -> Self {
        let valence = element.valence_electrons();
        let hybridization = match valence {
            0 | 1 => Hybridization::S,
            2 => Hybridization::Sp,
            3 => Hybridization::Sp2,
            _ => Hybridization::Sp3,
        };
        Self {
            symbol: symbol.to_string(),
            id,
            element,
            valence,
            lone: valence,
            hybridization,
            hybrid: fill_hybrid_orbitals(valence, hybridization, 0),
            p: Vec::new(),
            bonds: Vec::new(),
        }
    }

    fn label(&self) -> String {
        format!("{}#{}", self.symbol, self.id)
    }

    fn bonded_to(&self, other: usize) -> bool {
        self.bonds.iter().any(|&(partner, _)| partner == other)
    }

    fn unpaired_p(&self) -> Option<usize> {
        self.p.iter().position(|&electrons| electrons == 1)
    }

    fn half_filled(&self, bond_type: BondType) -> Option<usize> {
        let orbitals = match bond_type {
            BondType::Sigma => &self.hybrid,
            BondType::Pi => &self.p,
        };
        orbitals.iter().position(|&electrons| electrons == 1)
    }

    fn limit(&self) -> SolverError {
        SolverError::HybridizationLimit {
            name: self.symbol.clone(),
            id: self.id,
            hybridization: self.hybridization,
        }
    }

    /// Turns an unpaired p electron into a lone pair, one step up the ladder.
    fn pair_unpaired(&mut self, orbital: usize) -> Result<(), SolverError> {
        let higher = self.hybridization.next().ok_or_else(|| self.limit())?;
        self.p.remove(orbital);
        self.hybrid.push(2);
        self.hybridization = higher;
        self.lone += 1;
        Ok(())
    }

    /// Gives up a filled hybrid orbital, leaving one electron in a new p orbital.
    fn release_hybrid(&mut self) -> Result<(), SolverError> {
        let lower = self
            .hybridization
            .previous()
            .filter(|_| !self.hybrid.is_empty())
            .ok_or_else(|| self.limit())?;
        self.hybrid.pop();
        self.p.push(1);
        self.hybridization = lower;
        self.lone = self.lone.saturating_sub(1);
        Ok(())
    }
}

/// Spreads `valence` electrons over the hybrid orbitals of `hybridization`
/// one at a time, then fills one half-filled orbital per existing bond.
fn fill_hybrid_orbitals(valence: u32, hybridization: Hybridization, bonds: usize) -> Vec<u8> {
    let count = hybridization.hybrid_orbital_count();
    let mut orbitals = vec![0u8; count];
    for electron in 0..(valence as usize).min(2 * count) {
        orbitals[electron % count] += 1;
    }
    for orbital in orbitals
        .iter_mut()
        .filter(|electrons| **electrons == 1)
        .take(bonds)
    {
        *orbital = 2;
    }
    orbitals
}

/// Least electronegative atom other than hydrogen; elements without an
/// electronegativity count as zero. An all-hydrogen molecule uses its first
/// atom.
fn choose_central(atoms: &[DraftAtom]) -> usize {
    atoms
        .iter()
        .enumerate()
        .filter(|(_, atom)| atom.symbol != "H")
        .min_by(|(_, a), (_, b)| {
            let a = a.element.electronegativity.unwrap_or(0.0);
            let b = b.element.electronegativity.unwrap_or(0.0);
            a.total_cmp(&b)
        })
        .map_or(0, |(index, _)| index)
}

struct Draft {
    atoms: Vec<DraftAtom>,
    central: usize,
}

impl Draft {
    fn new(formula: &str, elements: &ElementTable) -> Result<Self, SolverError> {
        let mut atoms = Vec::new();
        let mut next_id: HashMap<String, u32> = HashMap::new();
        for (symbol, count) in parse_formula(formula)? {
            let element = elements
                .get(&symbol)
                .ok_or_else(|| SolverError::UnknownElement {
                    symbol: symbol.clone(),
                })?;
            let id = next_id.entry(symbol.clone()).or_insert(0);
            for _ in 0..count {
                atoms.push(DraftAtom::new(&symbol, *id, element));
                *id += 1;
            }
        }
        let central = choose_central(&atoms);
        Ok(Self { atoms, central })
    }

    fn outer(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.atoms.len()).filter(move |&index| index != self.central)
    }

    fn find_unpaired(&self, mut order: impl Iterator<Item = usize>) -> Option<usize> {
        order.find(|&index| self.atoms[index].unpaired_p().is_some())
    }

    /// Bonds `outer` to the central atom if both have a half-filled orbital
    /// of the right kind.
    fn bond(&mut self, outer: usize, bond_type: BondType) -> bool {
        let central = self.central;
        let (Some(outer_slot), Some(central_slot)) = (
            self.atoms[outer].half_filled(bond_type),
            self.atoms[central].half_filled(bond_type),
        ) else {
            return false;
        };

        let ends = [(outer, outer_slot, central), (central, central_slot, outer)];
        for (index, slot, partner) in ends {
            let atom = &mut self.atoms[index];
            match bond_type {
                BondType::Sigma => atom.hybrid[slot] = 2,
                BondType::Pi => atom.p[slot] = 2,
            }
            atom.lone = atom.lone.saturating_sub(1);
            atom.bonds.push((partner, bond_type));
        }
        true
    }

    /// One pass over the other atoms; returns the number of bonds formed.
    fn bond_outer_atoms(&mut self, bond_type: BondType) -> usize {
        let mut formed = 0;
        for outer in 0..self.atoms.len() {
            if outer == self.central {
                continue;
            }
            if bond_type == BondType::Sigma && self.atoms[outer].bonded_to(self.central) {
                continue;
            }
            if self.bond(outer, bond_type) {
                formed += 1;
            }
        }
        formed
    }

    fn bond_sigma(&mut self) -> Result<(), SolverError> {
        self.bond_outer_atoms(BondType::Sigma);
        loop {
            let central = self.central;
            let Some(unbonded) = self.outer().find(|&i| !self.atoms[i].bonded_to(central)) else {
                return Ok(());
            };
            let Some(higher) = self.atoms[central].hybridization.next() else {
                let atom = &self.atoms[unbonded];
                return Err(SolverError::Unbondable {
                    name: atom.symbol.clone(),
                    id: atom.id,
                });
            };

            let hub = &mut self.atoms[central];
            hub.hybridization = higher;
            hub.hybrid = fill_hybrid_orbitals(hub.valence, higher, hub.bonds.len());
            debug!(atom = %hub.label(), hybridization = %higher, "Raised central hybridization");
            self.bond_outer_atoms(BondType::Sigma);
        }
    }

    fn demote_half_filled_hybrids(&mut self) {
        for atom in &mut self.atoms {
            while let Some(orbital) = atom.half_filled(BondType::Sigma) {
                let Some(lower) = atom.hybridization.previous() else {
                    break;
                };
                atom.hybrid.remove(orbital);
                atom.p.push(1);
                atom.hybridization = lower;
            }
        }
    }

    fn bond_pi(&mut self) {
        while self.atoms[self.central].unpaired_p().is_some() {
            if self.bond_outer_atoms(BondType::Pi) == 0 {
                break;
            }
        }
    }

    fn apply_charge(&mut self, charge: i32) -> Result<(), SolverError> {
        for _ in 0..charge.unsigned_abs() {
            let target = if charge > 0 {
                self.find_unpaired(iter::once(self.central).chain(self.outer()))
            } else {
                self.find_unpaired(self.outer().chain(iter::once(self.central)))
            };
            let Some(index) = target else {
                warn!(charge, "No unpaired electron left to carry the charge");
                break;
            };

            let atom = &mut self.atoms[index];
            let Some(orbital) = atom.unpaired_p() else {
                continue;
            };
            if charge > 0 {
                atom.p.remove(orbital);
                atom.lone = atom.lone.saturating_sub(1);
            } else {
                atom.pair_unpaired(orbital)?;
            }
        }
        Ok(())
    }

    fn pair_remaining_electrons(&mut self) -> Result<(), SolverError> {
        while let Some(index) = self.find_unpaired(self.outer()) {
            let atom = &mut self.atoms[index];
            if let Some(orbital) = atom.unpaired_p() {
                atom.pair_unpaired(orbital)?;
            }
            let central = self.central;
            self.atoms[central].release_hybrid()?;
            self.bond_outer_atoms(BondType::Pi);
        }
        Ok(())
    }

    fn into_molecule(self, name: &str) -> Result<Molecule, SolverError> {
        let mut builder = MoleculeBuilder::new(name);
        let handles: Vec<AtomId> = self
            .atoms
            .iter()
            .map(|atom| {
                builder.add_atom(
                    Atom::new(
                        &atom.symbol,
                        atom.id,
                        atom.element.atomic_number,
                        atom.hybridization,
                    )
                    .with_lone_electrons(atom.lone)
                    .with_p_orbitals(atom.p.len()),
                )
            })
            .collect();

        for (atom, &from) in self.atoms.iter().zip(&handles) {
            for &(partner, bond_type) in &atom.bonds {
                builder.bond_entry(from, handles[partner], bond_type)?;
            }
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::Bond;
    use crate::engine::classifier::{Geometry, compute_geometry};

    fn solved(formula: &str, charge: i32) -> Molecule {
        solve(formula, charge, &ElementTable::builtin()).unwrap()
    }

    fn atom<'a>(molecule: &'a Molecule, name: &str, id: u32) -> (AtomId, &'a Atom) {
        let handle = molecule.find_atom(name, id).unwrap();
        (handle, molecule.atom(handle).unwrap())
    }

    #[test]
    fn parse_formula_reads_symbols_and_counts() {
        assert_eq!(
            parse_formula("H2O").unwrap(),
            vec![("H".to_string(), 2), ("O".to_string(), 1)]
        );
        assert_eq!(
            parse_formula(" NaCl ").unwrap(),
            vec![("Na".to_string(), 1), ("Cl".to_string(), 1)]
        );
        assert_eq!(
            parse_formula("C12H22").unwrap(),
            vec![("C".to_string(), 12), ("H".to_string(), 22)]
        );
    }

    #[test]
    fn parse_formula_rejects_malformed_input() {
        assert_eq!(parse_formula("  "), Err(SolverError::EmptyFormula));
        assert_eq!(
            parse_formula("h2o"),
            Err(SolverError::InvalidFormula {
                formula: "h2o".to_string(),
                position: 0,
                found: 'h'
            })
        );
        assert_eq!(
            parse_formula("Ca(OH)2"),
            Err(SolverError::InvalidFormula {
                formula: "Ca(OH)2".to_string(),
                position: 2,
                found: '('
            })
        );
        assert_eq!(
            parse_formula("H0"),
            Err(SolverError::InvalidCount {
                symbol: "H".to_string()
            })
        );
    }

    #[test]
    fn water_has_an_sp3_oxygen_with_two_lone_pairs() {
        let molecule = solved("H2O", 0);
        assert_eq!(molecule.name(), "H2O_0");
        assert_eq!(molecule.len(), 3);

        let (o, oxygen) = atom(&molecule, "O", 0);
        assert_eq!(oxygen.hybridization, Hybridization::Sp3);
        assert_eq!(oxygen.lone_electrons, 4);
        assert_eq!(oxygen.p_orbital_count, 0);
        assert_eq!(oxygen.proton_count, 8);

        for id in 0..2 {
            let (h, hydrogen) = atom(&molecule, "H", id);
            assert_eq!(hydrogen.hybridization, Hybridization::S);
            assert_eq!(hydrogen.lone_electrons, 0);
            assert_eq!(molecule.bonds_of(h), &[Bond::new(o, BondType::Sigma)]);
        }

        let classification = compute_geometry(&molecule).unwrap();
        assert_eq!(classification.central_atom, o);
        assert_eq!(classification.geometry, Geometry::Bent2Lone);
    }

    #[test]
    fn carbon_dioxide_has_an_sp_carbon_with_two_p_lobes() {
        let molecule = solved("CO2", 0);
        let (c, carbon) = atom(&molecule, "C", 0);
        let (o0, _) = atom(&molecule, "O", 0);
        let (o1, _) = atom(&molecule, "O", 1);

        assert_eq!(carbon.hybridization, Hybridization::Sp);
        assert_eq!(carbon.p_orbital_count, 2);
        assert_eq!(carbon.lone_electrons, 0);
        assert_eq!(
            molecule.bonds_of(c),
            &[
                Bond::new(o0, BondType::Sigma),
                Bond::new(o1, BondType::Sigma),
                Bond::new(o0, BondType::Pi),
                Bond::new(o1, BondType::Pi),
            ]
        );

        for o in [o0, o1] {
            let oxygen = molecule.atom(o).unwrap();
            assert_eq!(oxygen.hybridization, Hybridization::Sp2);
            assert_eq!(oxygen.lone_electrons, 4);
            assert_eq!(oxygen.p_orbital_count, 1);
            assert_eq!(
                molecule.bonds_of(o),
                &[Bond::new(c, BondType::Sigma), Bond::new(c, BondType::Pi)]
            );
        }
        assert_eq!(compute_geometry(&molecule).unwrap().geometry, Geometry::Linear);
    }

    #[test]
    fn sulfur_dioxide_gives_up_a_hybrid_for_one_pi_bond() {
        let molecule = solved("SO2", 0);
        let (s, sulfur) = atom(&molecule, "S", 0);
        assert_eq!(sulfur.hybridization, Hybridization::Sp2);
        assert_eq!(sulfur.lone_electrons, 2);
        assert_eq!(sulfur.p_orbital_count, 1);

        let (_, single) = atom(&molecule, "O", 0);
        assert_eq!(single.hybridization, Hybridization::Sp3);
        assert_eq!(single.lone_electrons, 6);

        let (o1, double) = atom(&molecule, "O", 1);
        assert_eq!(double.hybridization, Hybridization::Sp2);
        assert_eq!(double.lone_electrons, 4);
        assert!(molecule.bonds_of(s).contains(&Bond::new(o1, BondType::Pi)));

        assert_eq!(compute_geometry(&molecule).unwrap().geometry, Geometry::Bent1Lone);
    }

    #[test]
    fn expanded_octets_raise_the_central_hybridization() {
        let pcl5 = solved("PCl5", 0);
        let (_, phosphorus) = atom(&pcl5, "P", 0);
        assert_eq!(phosphorus.hybridization, Hybridization::Sp3d);
        assert_eq!(phosphorus.lone_electrons, 0);
        assert_eq!(
            compute_geometry(&pcl5).unwrap().geometry,
            Geometry::TrigonalBipyramidal
        );

        let xef4 = solved("XeF4", 0);
        let (_, xenon) = atom(&xef4, "Xe", 0);
        assert_eq!(xenon.hybridization, Hybridization::Sp3d2);
        assert_eq!(xenon.lone_electrons, 4);
        assert_eq!(compute_geometry(&xef4).unwrap().geometry, Geometry::SquarePlanar);
    }

    #[test]
    fn positive_charge_removes_the_central_unpaired_electron() {
        let molecule = solved("NH4", 1);
        assert_eq!(molecule.name(), "NH4_1");
        let (_, nitrogen) = atom(&molecule, "N", 0);
        assert_eq!(nitrogen.hybridization, Hybridization::Sp3);
        assert_eq!(nitrogen.lone_electrons, 0);
        assert_eq!(nitrogen.p_orbital_count, 0);
        assert_eq!(compute_geometry(&molecule).unwrap().geometry, Geometry::Tetrahedral);
    }

    #[test]
    fn negative_charge_completes_an_outer_lone_pair() {
        let molecule = solved("NO3", -1);
        let (n, nitrogen) = atom(&molecule, "N", 0);
        assert_eq!(nitrogen.hybridization, Hybridization::Sp2);
        assert_eq!(nitrogen.lone_electrons, 0);

        let pi_bonds = molecule
            .bonds_of(n)
            .iter()
            .filter(|bond| bond.bond_type == BondType::Pi)
            .count();
        assert_eq!(pi_bonds, 1);
        assert_eq!(
            compute_geometry(&molecule).unwrap().geometry,
            Geometry::TrigonalPlanar
        );
    }

    #[test]
    fn hydrogen_only_and_monatomic_formulas() {
        let h2 = solved("H2", 0);
        let (h0, _) = atom(&h2, "H", 0);
        let (h1, _) = atom(&h2, "H", 1);
        assert_eq!(h2.bonds_of(h0), &[Bond::new(h1, BondType::Sigma)]);
        assert_eq!(compute_geometry(&h2).unwrap().geometry, Geometry::Linear2);

        let neon = solved("Ne", 0);
        let (_, neon_atom) = atom(&neon, "Ne", 0);
        assert_eq!(neon_atom.lone_electrons, 8);
        assert_eq!(compute_geometry(&neon).unwrap().geometry, Geometry::Single);
    }

    #[test]
    fn central_atom_is_the_least_electronegative_heavy_atom() {
        let molecule = solved("HCN", 0);
        let (c, carbon) = atom(&molecule, "C", 0);
        assert_eq!(carbon.hybridization, Hybridization::Sp);
        assert_eq!(compute_geometry(&molecule).unwrap().central_atom, c);
    }

    #[test]
    fn unknown_elements_are_reported() {
        assert_eq!(
            solve("XxO", 0, &ElementTable::builtin()).err(),
            Some(SolverError::UnknownElement {
                symbol: "Xx".to_string()
            })
        );
    }

    #[test]
    fn atoms_that_cannot_bond_are_reported() {
        assert_eq!(
            solve("HeF3", 0, &ElementTable::builtin()).err(),
            Some(SolverError::Unbondable {
                name: "F".to_string(),
                id: 2
            })
        );
    }

    #[test]
    fn hybrid_orbitals_fill_singly_before_pairing() {
        assert_eq!(fill_hybrid_orbitals(6, Hybridization::Sp3, 0), vec![2, 2, 1, 1]);
        assert_eq!(fill_hybrid_orbitals(5, Hybridization::Sp3d, 3), vec![2, 2, 2, 1, 1]);
        assert_eq!(fill_hybrid_orbitals(1, Hybridization::S, 0), vec![1]);
        assert_eq!(fill_hybrid_orbitals(8, Hybridization::Sp, 0), vec![2, 2]);
    }
}
