use super::classifier::{Classification, Geometry, compute_geometry};
use super::config::PlacementConfig;
use super::error::EngineError;
use super::orbitals::{OrientedOrbital, atom_orbitals, tetrahedral_rotations};
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::debug;

/// World transform of one atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondedAtom {
    pub atom: AtomId,
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl BondedAtom {
    fn at_origin(atom: AtomId) -> Self {
        Self {
            atom,
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Lobes of the placed atom, relative to [`rotation`](Self::rotation).
    ///
    /// # Errors
    ///
    /// * [`EngineError::UnknownAtom`] if the handle is not part of `molecule`.
    /// * [`EngineError::UnsupportedHybridization`] for `sp3d` and above.
    pub fn oriented_orbitals(
        &self,
        molecule: &Molecule,
    ) -> Result<Vec<OrientedOrbital>, EngineError> {
        let atom = molecule
            .atom(self.atom)
            .ok_or(EngineError::UnknownAtom { atom: self.atom })?;
        atom_orbitals(atom)
    }
}

/// Classifies `molecule` and places every atom.
///
/// The central atom comes first in the returned list, followed by the others
/// in molecule order.
pub fn compute_atom_locs_rots(
    molecule: &Molecule,
    config: &PlacementConfig,
) -> Result<Vec<BondedAtom>, EngineError> {
    if molecule.is_empty() {
        return Err(EngineError::EmptyMolecule);
    }
    let classification = compute_geometry(molecule)?;
    place_atoms(molecule, &classification, config)
}

/// Places every atom for an already computed classification.
///
/// # Errors
///
/// * [`EngineError::EmptyMolecule`] for a molecule without atoms.
/// * [`EngineError::UnknownAtom`] if the central atom is not part of `molecule`.
/// * [`EngineError::NoNonCentralAtomFound`] if the geometry needs neighbours
///   but the molecule has none.
/// * [`EngineError::UnsupportedGeometry`] for five or more electron groups.
/// * [`EngineError::NeighbourCountMismatch`] if the molecule does not have
///   exactly as many non-central atoms as the geometry has bonded positions.
pub fn place_atoms(
    molecule: &Molecule,
    classification: &Classification,
    config: &PlacementConfig,
) -> Result<Vec<BondedAtom>, EngineError> {
    if molecule.is_empty() {
        return Err(EngineError::EmptyMolecule);
    }
    let central = classification.central_atom;
    if !molecule.contains(central) {
        return Err(EngineError::UnknownAtom { atom: central });
    }

    let mut central_atom = BondedAtom::at_origin(central);
    let geometry = classification.geometry;
    debug!(%geometry, "Placing atoms");

    if geometry == Geometry::Single {
        return Ok(vec![central_atom]);
    }

    let mut others = molecule.atoms_except(central).peekable();
    if others.peek().is_none() {
        return Err(EngineError::NoNonCentralAtomFound);
    }

    if geometry == Geometry::Linear2 {
        let Some((id, atom)) = others.next() else {
            return Err(EngineError::NoNonCentralAtomFound);
        };
        let mut second = place_diatomic_partner(id, atom, config);
        if config.centralize {
            let half = second.position.x / 2.0;
            central_atom.position.x -= half;
            second.position.x -= half;
        }
        return Ok(vec![central_atom, second]);
    }

    let slot: fn(usize, f64) -> (Point3<f64>, UnitQuaternion<f64>) = match geometry {
        Geometry::Linear => linear_slot,
        Geometry::TrigonalPlanar | Geometry::Bent1Lone => trigonal_slot,
        Geometry::Tetrahedral | Geometry::TrigonalPyramidal | Geometry::Bent2Lone => {
            tetrahedral_slot
        }
        _ => return Err(EngineError::UnsupportedGeometry { geometry }),
    };

    let expected = geometry.neighbour_count();
    let found = (molecule.len() - 1) as u32;
    if found != expected {
        return Err(EngineError::NeighbourCountMismatch {
            geometry,
            expected,
            found,
        });
    }

    let mut placed = Vec::with_capacity(molecule.len());
    placed.push(central_atom);
    for (index, (id, atom)) in others.enumerate() {
        let (position, rotation) = slot(index, bond_shift(atom, config));
        placed.push(BondedAtom {
            atom: id,
            position,
            rotation,
        });
    }
    Ok(placed)
}

/// Distance from the central atom for a placed neighbour: unhybridized atoms
/// sit at the `s` shift, hybridized ones at the orbital-overlap shift.
fn bond_shift(atom: &Atom, config: &PlacementConfig) -> f64 {
    if atom.hybridization.is_hybridized() {
        config.sp_orbital_shift
    } else {
        config.s_orbital_shift
    }
}

fn place_diatomic_partner(id: AtomId, atom: &Atom, config: &PlacementConfig) -> BondedAtom {
    if atom.hybridization.is_hybridized() {
        // Turned half a revolution so one of its lobes points back at the centre.
        BondedAtom {
            atom: id,
            position: Point3::new(-config.sp_orbital_shift, 0.0, 0.0),
            rotation: about_z(PI),
        }
    } else {
        BondedAtom {
            atom: id,
            position: Point3::new(
                -(config.s_orbital_shift * f64::from(atom.proton_count)),
                0.0,
                0.0,
            ),
            rotation: UnitQuaternion::identity(),
        }
    }
}

fn about_z(angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

fn linear_slot(index: usize, shift: f64) -> (Point3<f64>, UnitQuaternion<f64>) {
    let i = index as f64;
    let sign = if index % 2 == 0 { -1.0 } else { 1.0 };
    // The x twist lines up p lobes of opposite neighbours for pi bonding.
    let rotation = about_z((i + 1.0) * PI)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), (i - 1.0) * FRAC_PI_2);
    (Point3::new(sign * shift, 0.0, 0.0), rotation)
}

fn trigonal_slot(index: usize, shift: f64) -> (Point3<f64>, UnitQuaternion<f64>) {
    let radial = about_z(2.0 * PI * index as f64 / 3.0);
    inward_facing(radial, shift)
}

// `index` is below 4; `place_atoms` checks the neighbour count first.
fn tetrahedral_slot(index: usize, shift: f64) -> (Point3<f64>, UnitQuaternion<f64>) {
    let [a, b, c] = tetrahedral_rotations();
    let radial = [UnitQuaternion::identity(), a, b, c][index];
    inward_facing(radial, shift)
}

fn inward_facing(radial: UnitQuaternion<f64>, shift: f64) -> (Point3<f64>, UnitQuaternion<f64>) {
    (radial * Point3::new(-shift, 0.0, 0.0), radial * about_z(PI))
}
