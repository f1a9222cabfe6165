use super::error::EngineError;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use tracing::trace;

/// How the central atom was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// The molecule has a single atom.
    Monatomic,
    /// Two atoms; the heavier nucleus wins.
    Diatomic,
    /// Three or more atoms; the atom referenced by the most neighbours wins.
    Hub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentralAtom {
    pub id: AtomId,
    pub kind: SelectionKind,
}

/// Picks the atom the rest of the molecule is arranged around.
///
/// Every comparison is a strict `>` while scanning in molecule order, so the
/// first of several equally good candidates is kept. This makes the result a
/// deterministic function of the insertion order.
///
/// # Errors
///
/// * [`EngineError::EmptyMolecule`] for a molecule without atoms.
/// * [`EngineError::AmbiguousCentralAtom`] when no atom of a 3+ atom molecule
///   is referenced by any other atom.
pub fn select_central_atom(molecule: &Molecule) -> Result<CentralAtom, EngineError> {
    let ids = molecule.atom_ids();
    match ids.len() {
        0 => Err(EngineError::EmptyMolecule),
        1 => Ok(CentralAtom {
            id: ids[0],
            kind: SelectionKind::Monatomic,
        }),
        2 => heaviest_atom(molecule)
            .map(|id| CentralAtom {
                id,
                kind: SelectionKind::Diatomic,
            })
            .ok_or(EngineError::AmbiguousCentralAtom),
        _ => most_referenced_atom(molecule)
            .map(|id| CentralAtom {
                id,
                kind: SelectionKind::Hub,
            })
            .ok_or(EngineError::AmbiguousCentralAtom),
    }
}

fn heaviest_atom(molecule: &Molecule) -> Option<AtomId> {
    let mut best: Option<(AtomId, u32)> = None;
    for (id, atom) in molecule.atoms() {
        if best.is_none_or(|(_, protons)| atom.proton_count > protons) {
            best = Some((id, atom.proton_count));
        }
    }
    best.map(|(id, _)| id)
}

/// Number of atoms other than `target` that list at least one bond to it.
fn reference_count(molecule: &Molecule, target: AtomId) -> usize {
    molecule
        .atoms_except(target)
        .filter(|(other, _)| molecule.has_bond_entry(*other, target))
        .count()
}

fn most_referenced_atom(molecule: &Molecule) -> Option<AtomId> {
    let mut best: Option<(AtomId, usize)> = None;
    for &id in molecule.atom_ids() {
        let count = reference_count(molecule, id);
        trace!(?id, count, "Counted neighbour references");
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}
