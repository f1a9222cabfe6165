use super::error::EngineError;
use super::selector::{SelectionKind, select_central_atom};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use std::fmt;
use tracing::debug;

/// VSEPR shape of a molecule around its central atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geometry {
    /// A lone atom.
    Single,
    /// Two atoms; the table below is bypassed.
    Linear2,
    Linear,
    TrigonalPlanar,
    Bent1Lone,
    Tetrahedral,
    TrigonalPyramidal,
    Bent2Lone,
    TrigonalBipyramidal,
    Seesaw,
    TShape,
    Linear3Lone,
    Octahedral,
    SquarePyramidal,
    SquarePlanar,
    PentagonalBipyramidal,
    PentagonalPyramidal,
    PentagonalPlanar,
    SquareAntiprismatic,
}

impl Geometry {
    /// Electron-domain group count this shape is derived from, or `None` for
    /// the degenerate one- and two-atom cases.
    pub fn electron_groups(self) -> Option<u32> {
        use Geometry::*;
        match self {
            Single | Linear2 => None,
            Linear => Some(2),
            TrigonalPlanar | Bent1Lone => Some(3),
            Tetrahedral | TrigonalPyramidal | Bent2Lone => Some(4),
            TrigonalBipyramidal | Seesaw | TShape | Linear3Lone => Some(5),
            Octahedral | SquarePyramidal | SquarePlanar => Some(6),
            PentagonalBipyramidal | PentagonalPyramidal | PentagonalPlanar => Some(7),
            SquareAntiprismatic => Some(8),
        }
    }

    /// Lone pairs on the central atom implied by this shape.
    pub fn lone_pairs(self) -> u32 {
        use Geometry::*;
        match self {
            Single | Linear2 | Linear | TrigonalPlanar | Tetrahedral | TrigonalBipyramidal
            | Octahedral | PentagonalBipyramidal | SquareAntiprismatic => 0,
            Bent1Lone | TrigonalPyramidal | Seesaw | SquarePyramidal | PentagonalPyramidal => 1,
            Bent2Lone | TShape | SquarePlanar | PentagonalPlanar => 2,
            Linear3Lone => 3,
        }
    }

    /// Number of atoms bonded to the central atom in this shape.
    pub fn neighbour_count(self) -> u32 {
        match self {
            Geometry::Single => 0,
            Geometry::Linear2 => 1,
            other => other.electron_groups().unwrap_or(0) - other.lone_pairs(),
        }
    }

    fn as_str(self) -> &'static str {
        use Geometry::*;
        match self {
            Single => "single",
            Linear2 => "linear-2",
            Linear => "linear",
            TrigonalPlanar => "trigonal-planar",
            Bent1Lone => "bent-1-lone",
            Tetrahedral => "tetrahedral",
            TrigonalPyramidal => "trigonal-pyramidal",
            Bent2Lone => "bent-2-lone",
            TrigonalBipyramidal => "trigonal-bipyramidal",
            Seesaw => "seesaw",
            TShape => "t-shape",
            Linear3Lone => "linear-3-lone",
            Octahedral => "octahedral",
            SquarePyramidal => "square-pyramidal",
            SquarePlanar => "square-planar",
            PentagonalBipyramidal => "pentagonal-bipyramidal",
            PentagonalPyramidal => "pentagonal-pyramidal",
            PentagonalPlanar => "pentagonal-planar",
            SquareAntiprismatic => "square-antiprismatic",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a geometry query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub central_atom: AtomId,
    pub geometry: Geometry,
}

/// Electron-domain groups around the central atom: every other atom plus one
/// group per lone pair.
pub fn steric_number(atom_count: usize, lone_electrons: u32) -> u32 {
    atom_count.saturating_sub(1) as u32 + lone_electrons / 2
}

/// Maps a steric number and the central atom's raw lone-electron count onto
/// a named geometry.
///
/// # Errors
///
/// Returns [`EngineError::NoGeometryFound`] for any pair outside the table,
/// including odd lone-electron counts.
pub fn classify(steric_number: u32, lone_electrons: u32) -> Result<Geometry, EngineError> {
    use Geometry::*;
    let geometry = match (steric_number, lone_electrons) {
        (2, 0) => Linear,
        (3, 0) => TrigonalPlanar,
        (3, 2) => Bent1Lone,
        (4, 0) => Tetrahedral,
        (4, 2) => TrigonalPyramidal,
        (4, 4) => Bent2Lone,
        (5, 0) => TrigonalBipyramidal,
        (5, 2) => Seesaw,
        (5, 4) => TShape,
        (5, 6) => Linear3Lone,
        (6, 0) => Octahedral,
        (6, 2) => SquarePyramidal,
        (6, 4) => SquarePlanar,
        (7, 0) => PentagonalBipyramidal,
        (7, 2) => PentagonalPyramidal,
        (7, 4) => PentagonalPlanar,
        (8, 0) => SquareAntiprismatic,
        _ => {
            return Err(EngineError::NoGeometryFound {
                steric_number,
                lone_electrons,
            });
        }
    };
    Ok(geometry)
}

/// Selects the central atom and classifies the molecule's shape.
///
/// The molecule is not modified; calling this twice yields the same value.
pub fn compute_geometry(molecule: &Molecule) -> Result<Classification, EngineError> {
    let central = select_central_atom(molecule)?;
    let geometry = match central.kind {
        SelectionKind::Monatomic => Geometry::Single,
        SelectionKind::Diatomic => Geometry::Linear2,
        SelectionKind::Hub => {
            let lone_electrons = molecule
                .atom(central.id)
                .ok_or(EngineError::UnknownAtom { atom: central.id })?
                .lone_electrons;
            let steric = steric_number(molecule.len(), lone_electrons);
            debug!(steric, lone_electrons, "Classifying around hub atom");
            classify(steric, lone_electrons)?
        }
    };

    debug!(%geometry, "Geometry classified");
    Ok(Classification {
        central_atom: central.id,
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, Hybridization};
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::models::topology::BondType;

    fn star(neighbours: u32, lone_electrons: u32) -> (Molecule, AtomId) {
        let mut builder = MoleculeBuilder::new("star");
        let center = builder.add_atom(
            Atom::new("X", 0, 20, Hybridization::Sp3).with_lone_electrons(lone_electrons),
        );
        for i in 0..neighbours {
            let h = builder.add_atom(Atom::new("H", i, 1, Hybridization::S));
            builder.bond(center, h, BondType::Sigma).unwrap();
        }
        (builder.build(), center)
    }

    #[test]
    fn steric_number_counts_neighbours_and_lone_pairs() {
        assert_eq!(steric_number(5, 0), 4);
        assert_eq!(steric_number(3, 4), 4);
        assert_eq!(steric_number(4, 3), 4);
        assert_eq!(steric_number(1, 0), 0);
        assert_eq!(steric_number(0, 0), 0);
    }

    #[test]
    fn classify_covers_every_table_cell() {
        use Geometry::*;
        let table = [
            (2, 0, Linear),
            (3, 0, TrigonalPlanar),
            (3, 2, Bent1Lone),
            (4, 0, Tetrahedral),
            (4, 2, TrigonalPyramidal),
            (4, 4, Bent2Lone),
            (5, 0, TrigonalBipyramidal),
            (5, 2, Seesaw),
            (5, 4, TShape),
            (5, 6, Linear3Lone),
            (6, 0, Octahedral),
            (6, 2, SquarePyramidal),
            (6, 4, SquarePlanar),
            (7, 0, PentagonalBipyramidal),
            (7, 2, PentagonalPyramidal),
            (7, 4, PentagonalPlanar),
            (8, 0, SquareAntiprismatic),
        ];
        for (steric, lone, expected) in table {
            assert_eq!(classify(steric, lone), Ok(expected));
            assert_eq!(expected.electron_groups(), Some(steric));
            assert_eq!(expected.lone_pairs(), lone / 2);
            assert_eq!(expected.neighbour_count(), steric - lone / 2);
        }
    }

    #[test]
    fn classify_rejects_cells_outside_the_table() {
        for (steric, lone) in [(2, 2), (3, 1), (3, 4), (4, 6), (6, 6), (8, 2), (9, 0), (1, 0)] {
            assert_eq!(
                classify(steric, lone),
                Err(EngineError::NoGeometryFound {
                    steric_number: steric,
                    lone_electrons: lone
                })
            );
        }
    }

    #[test]
    fn compute_geometry_of_empty_molecule_fails() {
        assert_eq!(
            compute_geometry(&Molecule::default()),
            Err(EngineError::EmptyMolecule)
        );
    }

    #[test]
    fn single_atom_is_single() {
        let (molecule, center) = star(0, 8);
        assert_eq!(
            compute_geometry(&molecule),
            Ok(Classification {
                central_atom: center,
                geometry: Geometry::Single
            })
        );
    }

    #[test]
    fn diatomic_bypasses_the_table() {
        let (molecule, center) = star(1, 6);
        let classification = compute_geometry(&molecule).unwrap();
        assert_eq!(classification.geometry, Geometry::Linear2);
        assert_eq!(classification.central_atom, center);
    }

    #[test]
    fn steric_four_classifications() {
        assert_eq!(
            compute_geometry(&star(4, 0).0).unwrap().geometry,
            Geometry::Tetrahedral
        );
        assert_eq!(
            compute_geometry(&star(3, 2).0).unwrap().geometry,
            Geometry::TrigonalPyramidal
        );
        assert_eq!(
            compute_geometry(&star(2, 4).0).unwrap().geometry,
            Geometry::Bent2Lone
        );
    }

    #[test]
    fn odd_lone_electrons_are_reported() {
        let (molecule, _) = star(3, 1);
        assert_eq!(
            compute_geometry(&molecule),
            Err(EngineError::NoGeometryFound {
                steric_number: 3,
                lone_electrons: 1
            })
        );
    }

    #[test]
    fn compute_geometry_is_idempotent() {
        let (molecule, _) = star(5, 2);
        let first = compute_geometry(&molecule).unwrap();
        let second = compute_geometry(&molecule).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.geometry, Geometry::SquarePyramidal);
    }

    #[test]
    fn degenerate_shapes_have_fixed_neighbour_counts() {
        assert_eq!(Geometry::Single.neighbour_count(), 0);
        assert_eq!(Geometry::Linear2.neighbour_count(), 1);
        assert_eq!(Geometry::Single.electron_groups(), None);
    }

    #[test]
    fn display_uses_kebab_case() {
        assert_eq!(Geometry::TShape.to_string(), "t-shape");
        assert_eq!(Geometry::Linear2.to_string(), "linear-2");
        assert_eq!(
            Geometry::SquareAntiprismatic.to_string(),
            "square-antiprismatic"
        );
    }
}
