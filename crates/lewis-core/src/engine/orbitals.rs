use super::error::EngineError;
use crate::core::models::atom::{Atom, Hybridization};
use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// Kind of lobe mesh an orbital is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitalType {
    S,
    Sp,
    P,
}

impl fmt::Display for OrbitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::S => "s",
            Self::Sp => "sp",
            Self::P => "p",
        })
    }
}

/// One lobe of an atom, oriented relative to the atom's own rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedOrbital {
    pub orbital_type: OrbitalType,
    pub orientation: UnitQuaternion<f64>,
}

impl OrientedOrbital {
    fn new(orbital_type: OrbitalType, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            orbital_type,
            orientation,
        }
    }
}

/// Angle between two bonds of a regular tetrahedron, `acos(-1/3)`.
pub fn tetrahedral_angle() -> f64 {
    (-1.0f64 / 3.0).acos()
}

/// The three rotations that carry the first tetrahedral direction onto the
/// other three.
pub(crate) fn tetrahedral_rotations() -> [UnitQuaternion<f64>; 3] {
    let half_root3 = 3.0f64.sqrt() / 2.0;
    let angle = tetrahedral_angle();
    [
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(0.0, -half_root3, 0.5),
        Vector3::new(0.0, half_root3, 0.5),
    ]
    .map(|axis| UnitQuaternion::from_scaled_axis(axis.normalize() * angle))
}

fn about_z(angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Local lobe layout for an atom of the given hybridization carrying
/// `p_orbital_count` unhybridized p orbitals.
///
/// Hybrid lobes come first, then the p lobes. P lobes alternate between a
/// quarter turn about +y and about +z so that consecutive ones are
/// perpendicular.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedHybridization`] for `sp3d` and above.
pub fn oriented_orbitals(
    hybridization: Hybridization,
    p_orbital_count: usize,
) -> Result<Vec<OrientedOrbital>, EngineError> {
    let mut orbitals = Vec::with_capacity(hybridization.hybrid_orbital_count() + p_orbital_count);

    match hybridization {
        Hybridization::S => {
            orbitals.push(OrientedOrbital::new(
                OrbitalType::S,
                UnitQuaternion::identity(),
            ));
        }
        Hybridization::Sp => {
            orbitals.extend(
                [0.0, PI]
                    .map(|angle| OrientedOrbital::new(OrbitalType::Sp, about_z(angle))),
            );
        }
        Hybridization::Sp2 => {
            orbitals.extend(
                [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0]
                    .map(|angle| OrientedOrbital::new(OrbitalType::Sp, about_z(angle))),
            );
        }
        Hybridization::Sp3 => {
            orbitals.push(OrientedOrbital::new(
                OrbitalType::Sp,
                UnitQuaternion::identity(),
            ));
            orbitals.extend(
                tetrahedral_rotations()
                    .map(|rotation| OrientedOrbital::new(OrbitalType::Sp, rotation)),
            );
        }
        Hybridization::Sp3d
        | Hybridization::Sp3d2
        | Hybridization::Sp3d3
        | Hybridization::Sp3d4
        | Hybridization::Sp3d5 => {
            return Err(EngineError::UnsupportedHybridization { hybridization });
        }
    }

    orbitals.extend((0..p_orbital_count).map(|i| {
        let axis = if i % 2 == 0 {
            Vector3::y_axis()
        } else {
            Vector3::z_axis()
        };
        OrientedOrbital::new(
            OrbitalType::P,
            UnitQuaternion::from_axis_angle(&axis, FRAC_PI_2),
        )
    }));

    Ok(orbitals)
}

/// Convenience wrapper reading hybridization and p-orbital count from an atom.
pub fn atom_orbitals(atom: &Atom) -> Result<Vec<OrientedOrbital>, EngineError> {
    oriented_orbitals(atom.hybridization, atom.p_orbital_count)
}
