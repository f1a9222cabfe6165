use super::atom::Atom;
use super::ids::AtomId;
use super::topology::Bond;
use slotmap::{SecondaryMap, SlotMap};

/// A molecule: its atoms and, per atom, the list of bonds that atom declares.
///
/// Atoms are stored in an arena and referred to by [`AtomId`] handles
/// everywhere else. Iteration always follows insertion order, which is the
/// order the geometry engine uses for tie-breaking and for indexing the
/// non-central atoms during placement.
///
/// A `Molecule` is immutable once built; construct one through
/// [`MoleculeBuilder`](super::builder::MoleculeBuilder).
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub(super) name: String,
    pub(super) atoms: SlotMap<AtomId, Atom>,
    /// Insertion order of the atoms in `atoms`.
    pub(super) order: Vec<AtomId>,
    /// Directed adjacency lists, lockstep with `atoms`.
    pub(super) bonds: SecondaryMap<AtomId, Vec<Bond>>,
}

impl Molecule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Retrieves an atom by its handle.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom belongs to this molecule, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn contains(&self, id: AtomId) -> bool {
        self.atoms.contains_key(id)
    }

    /// Returns the atom handles in molecule order.
    pub fn atom_ids(&self) -> &[AtomId] {
        &self.order
    }

    /// Returns an iterator over `(AtomId, &Atom)` pairs in molecule order.
    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.order.iter().map(move |&id| (id, &self.atoms[id]))
    }

    /// Returns the bonds declared by the given atom, or an empty slice for an
    /// unknown handle.
    pub fn bonds_of(&self, id: AtomId) -> &[Bond] {
        self.bonds.get(id).map_or(&[], Vec::as_slice)
    }

    /// Whether `from` lists a bond pointing at `to`.
    ///
    /// Only the adjacency list of `from` is consulted; the reverse entry is
    /// not assumed to exist.
    pub fn has_bond_entry(&self, from: AtomId, to: AtomId) -> bool {
        self.bonds_of(from).iter().any(|bond| bond.points_to(to))
    }

    /// Finds an atom by element symbol and source identifier.
    pub fn find_atom(&self, name: &str, id: u32) -> Option<AtomId> {
        self.atoms()
            .find(|(_, atom)| atom.id == id && atom.name == name)
            .map(|(atom_id, _)| atom_id)
    }

    /// Returns the atoms other than `central`, in molecule order.
    pub fn atoms_except(&self, central: AtomId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms().filter(move |(id, _)| *id != central)
    }
}

#[cfg(test)]
mod tests {
    use super::super::atom::Hybridization;
    use super::super::builder::MoleculeBuilder;
    use super::super::topology::BondType;
    use super::*;

    fn water() -> (Molecule, [AtomId; 3]) {
        let mut builder = MoleculeBuilder::new("H2O");
        let o = builder.add_atom(Atom::new("O", 0, 8, Hybridization::Sp3).with_lone_electrons(4));
        let h1 = builder.add_atom(Atom::new("H", 0, 1, Hybridization::S));
        let h2 = builder.add_atom(Atom::new("H", 1, 1, Hybridization::S));
        builder.bond(o, h1, BondType::Sigma).unwrap();
        builder.bond(o, h2, BondType::Sigma).unwrap();
        (builder.build(), [o, h1, h2])
    }

    #[test]
    fn atoms_iterate_in_insertion_order() {
        let (molecule, [o, h1, h2]) = water();
        let ids: Vec<_> = molecule.atoms().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![o, h1, h2]);
        assert_eq!(molecule.atom_ids(), &[o, h1, h2]);
        assert_eq!(molecule.len(), 3);
        assert!(!molecule.is_empty());
        assert_eq!(molecule.name(), "H2O");
    }

    #[test]
    fn bonds_of_returns_declared_entries() {
        let (molecule, [o, h1, h2]) = water();
        assert_eq!(molecule.bonds_of(o).len(), 2);
        assert_eq!(molecule.bonds_of(h1), &[Bond::new(o, BondType::Sigma)]);
        assert!(molecule.has_bond_entry(o, h2));
        assert!(molecule.has_bond_entry(h2, o));
        assert!(!molecule.has_bond_entry(h1, h2));
    }

    #[test]
    fn find_atom_matches_name_and_id() {
        let (molecule, [o, _, h2]) = water();
        assert_eq!(molecule.find_atom("O", 0), Some(o));
        assert_eq!(molecule.find_atom("H", 1), Some(h2));
        assert_eq!(molecule.find_atom("H", 2), None);
        assert_eq!(molecule.find_atom("N", 0), None);
    }

    #[test]
    fn atoms_except_skips_only_the_given_atom() {
        let (molecule, [o, h1, h2]) = water();
        let rest: Vec<_> = molecule.atoms_except(o).map(|(id, _)| id).collect();
        assert_eq!(rest, vec![h1, h2]);
    }

    #[test]
    fn unknown_handles_are_reported_as_absent() {
        let (molecule, _) = water();
        let mut builder = MoleculeBuilder::new("He4");
        let mut foreign = None;
        for id in 0..4 {
            foreign = Some(builder.add_atom(Atom::new("He", id, 2, Hybridization::S)));
        }
        let other = builder.build();
        let foreign = foreign.unwrap();

        assert!(other.contains(foreign));
        assert!(!molecule.contains(foreign));
        assert!(molecule.atom(foreign).is_none());
        assert!(molecule.bonds_of(foreign).is_empty());
    }

    #[test]
    fn default_molecule_is_empty() {
        let molecule = Molecule::default();
        assert!(molecule.is_empty());
        assert_eq!(molecule.atoms().count(), 0);
    }
}
