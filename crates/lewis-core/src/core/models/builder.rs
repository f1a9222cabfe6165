use super::atom::Atom;
use super::ids::AtomId;
use super::molecule::Molecule;
use super::topology::{Bond, BondType};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("Atom handle {0:?} does not belong to this molecule")]
    UnknownAtom(AtomId),
}

/// Incrementally assembles a [`Molecule`].
///
/// Bonds are stored as directed adjacency entries. [`bond`](Self::bond) writes
/// both directions, while [`bond_entry`](Self::bond_entry) writes exactly one,
/// which is what ingestion layers that already list both ends use.
#[derive(Debug, Default)]
pub struct MoleculeBuilder {
    molecule: Molecule,
}

impl MoleculeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            molecule: Molecule {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let id = self.molecule.atoms.insert(atom);
        self.molecule.order.push(id);
        self.molecule.bonds.insert(id, Vec::new());
        id
    }

    /// Appends a single directed entry `from -> to` to the adjacency list of `from`.
    ///
    /// Duplicate entries are kept; a double bond is one sigma entry plus one pi entry.
    pub fn bond_entry(
        &mut self,
        from: AtomId,
        to: AtomId,
        bond_type: BondType,
    ) -> Result<&mut Self, MoleculeError> {
        self.ensure_atom(from)?;
        self.ensure_atom(to)?;
        self.molecule.bonds[from].push(Bond::new(to, bond_type));
        Ok(self)
    }

    /// Records a bond in both adjacency lists.
    pub fn bond(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        bond_type: BondType,
    ) -> Result<&mut Self, MoleculeError> {
        self.ensure_atom(atom1)?;
        self.ensure_atom(atom2)?;
        self.molecule.bonds[atom1].push(Bond::new(atom2, bond_type));
        self.molecule.bonds[atom2].push(Bond::new(atom1, bond_type));
        Ok(self)
    }

    pub fn find_atom(&self, name: &str, id: u32) -> Option<AtomId> {
        self.molecule.find_atom(name, id)
    }

    pub fn atom_count(&self) -> usize {
        self.molecule.len()
    }

    pub fn build(self) -> Molecule {
        self.molecule
    }

    fn ensure_atom(&self, id: AtomId) -> Result<(), MoleculeError> {
        if self.molecule.contains(id) {
            Ok(())
        } else {
            Err(MoleculeError::UnknownAtom(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Hybridization;

    #[test]
    fn add_atom_returns_distinct_handles_in_order() {
        let mut builder = MoleculeBuilder::new("CO2");
        let c = builder.add_atom(Atom::new("C", 0, 6, Hybridization::Sp));
        let o1 = builder.add_atom(Atom::new("O", 0, 8, Hybridization::Sp2));
        let o2 = builder.add_atom(Atom::new("O", 1, 8, Hybridization::Sp2));
        assert_ne!(c, o1);
        assert_ne!(o1, o2);
        assert_eq!(builder.atom_count(), 3);

        let molecule = builder.build();
        assert_eq!(molecule.atom_ids(), &[c, o1, o2]);
        assert!(molecule.bonds_of(c).is_empty());
    }

    #[test]
    fn bond_writes_both_directions() {
        let mut builder = MoleculeBuilder::new("HF");
        let h = builder.add_atom(Atom::new("H", 0, 1, Hybridization::S));
        let f = builder.add_atom(Atom::new("F", 0, 9, Hybridization::Sp3));
        builder.bond(h, f, BondType::Sigma).unwrap();
        let molecule = builder.build();

        assert_eq!(molecule.bonds_of(h), &[Bond::new(f, BondType::Sigma)]);
        assert_eq!(molecule.bonds_of(f), &[Bond::new(h, BondType::Sigma)]);
    }

    #[test]
    fn bond_entry_writes_one_direction_and_chains() {
        let mut builder = MoleculeBuilder::new("N2");
        let n1 = builder.add_atom(Atom::new("N", 0, 7, Hybridization::Sp));
        let n2 = builder.add_atom(Atom::new("N", 1, 7, Hybridization::Sp));
        builder
            .bond_entry(n1, n2, BondType::Sigma)
            .unwrap()
            .bond_entry(n1, n2, BondType::Pi)
            .unwrap();
        let molecule = builder.build();

        assert_eq!(
            molecule.bonds_of(n1),
            &[Bond::new(n2, BondType::Sigma), Bond::new(n2, BondType::Pi)]
        );
        assert!(molecule.bonds_of(n2).is_empty());
        assert!(!molecule.has_bond_entry(n2, n1));
    }

    #[test]
    fn bonding_unknown_handle_fails() {
        let mut other = MoleculeBuilder::new("other");
        other.add_atom(Atom::new("He", 0, 2, Hybridization::S));
        let foreign = other.add_atom(Atom::new("He", 1, 2, Hybridization::S));

        let mut builder = MoleculeBuilder::new("H");
        let h = builder.add_atom(Atom::new("H", 0, 1, Hybridization::S));

        assert_eq!(
            builder.bond(h, foreign, BondType::Sigma).err(),
            Some(MoleculeError::UnknownAtom(foreign))
        );
        assert_eq!(
            builder.bond_entry(foreign, h, BondType::Pi).err(),
            Some(MoleculeError::UnknownAtom(foreign))
        );
        assert!(builder.build().bonds_of(h).is_empty());
    }

    #[test]
    fn find_atom_resolves_source_identifiers() {
        let mut builder = MoleculeBuilder::new("H2");
        let h0 = builder.add_atom(Atom::new("H", 0, 1, Hybridization::S));
        let h1 = builder.add_atom(Atom::new("H", 1, 1, Hybridization::S));
        assert_eq!(builder.find_atom("H", 0), Some(h0));
        assert_eq!(builder.find_atom("H", 1), Some(h1));
        assert_eq!(builder.find_atom("He", 0), None);
    }
}
