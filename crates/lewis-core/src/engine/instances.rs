use super::config::OrbitalScales;
use super::error::EngineError;
use super::orbitals::{OrbitalType, OrientedOrbital};
use super::placement::BondedAtom;
use crate::core::models::molecule::Molecule;
use nalgebra::{Isometry3, Matrix4, Translation3};

/// Nuclei are drawn with the `s` mesh, shrunk relative to an `s` lobe.
const NUCLEUS_SCALE_DIVISOR: f64 = 1.5;

pub const NUCLEUS_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
pub const S_ORBITAL_COLOR: [f32; 4] = [0.3, 0.0, 0.3, 1.0];
pub const SP_ORBITAL_COLOR: [f32; 4] = [0.0, 0.3, 0.45, 1.0];
pub const P_ORBITAL_COLOR: [f32; 4] = [0.45, 0.0, 0.2, 1.0];

/// One mesh instance: the full model matrix and its flat colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceData {
    pub model_matrix: Matrix4<f64>,
    pub color: [f32; 4],
}

/// Per-instance transforms grouped by the mesh they are drawn with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBatches {
    pub nuclei: Vec<InstanceData>,
    pub s: Vec<InstanceData>,
    pub sp: Vec<InstanceData>,
    pub p: Vec<InstanceData>,
}

impl InstanceBatches {
    pub fn batch(&self, orbital_type: OrbitalType) -> &[InstanceData] {
        match orbital_type {
            OrbitalType::S => &self.s,
            OrbitalType::Sp => &self.sp,
            OrbitalType::P => &self.p,
        }
    }

    /// Total number of lobe instances, nuclei excluded.
    pub fn lobe_count(&self) -> usize {
        self.s.len() + self.sp.len() + self.p.len()
    }

    fn push_lobe(&mut self, orbital_type: OrbitalType, model_matrix: Matrix4<f64>) {
        let (batch, color) = match orbital_type {
            OrbitalType::S => (&mut self.s, S_ORBITAL_COLOR),
            OrbitalType::Sp => (&mut self.sp, SP_ORBITAL_COLOR),
            OrbitalType::P => (&mut self.p, P_ORBITAL_COLOR),
        };
        batch.push(InstanceData {
            model_matrix,
            color,
        });
    }
}

/// World transform of a placed atom: translate to its position, then rotate.
pub fn atom_model_matrix(placed: &BondedAtom) -> Matrix4<f64> {
    Isometry3::from_parts(Translation3::from(placed.position.coords), placed.rotation)
        .to_homogeneous()
}

fn scale_for(orbital_type: OrbitalType, scales: &OrbitalScales) -> f64 {
    match orbital_type {
        OrbitalType::S => scales.s,
        OrbitalType::Sp => scales.sp,
        OrbitalType::P => scales.p,
    }
}

/// Expands placed atoms into mesh instances.
///
/// Each atom contributes one nucleus and one instance per lobe. A lobe's
/// matrix is the atom matrix, then the lobe's local orientation, then a
/// uniform scale chosen by lobe type.
///
/// # Errors
///
/// Fails if a placement refers to an atom outside `molecule` or an atom
/// whose hybridization has no lobe layout.
pub fn build_instances(
    molecule: &Molecule,
    placed: &[BondedAtom],
    scales: &OrbitalScales,
) -> Result<InstanceBatches, EngineError> {
    let mut batches = InstanceBatches::default();
    for atom in placed {
        let orbitals = atom.oriented_orbitals(molecule)?;
        push_atom(&mut batches, atom, &orbitals, scales);
    }
    Ok(batches)
}

/// Like [`build_instances`], for atoms whose lobes are already generated.
pub fn instances_from_orbitals<'a>(
    atoms: impl IntoIterator<Item = (&'a BondedAtom, &'a [OrientedOrbital])>,
    scales: &OrbitalScales,
) -> InstanceBatches {
    let mut batches = InstanceBatches::default();
    for (atom, orbitals) in atoms {
        push_atom(&mut batches, atom, orbitals, scales);
    }
    batches
}

fn push_atom(
    batches: &mut InstanceBatches,
    atom: &BondedAtom,
    orbitals: &[OrientedOrbital],
    scales: &OrbitalScales,
) {
    let base = atom_model_matrix(atom);
    batches.nuclei.push(InstanceData {
        model_matrix: base * Matrix4::new_scaling(scales.s / NUCLEUS_SCALE_DIVISOR),
        color: NUCLEUS_COLOR,
    });

    for orbital in orbitals {
        let model = base
            * orbital.orientation.to_homogeneous()
            * Matrix4::new_scaling(scale_for(orbital.orbital_type, scales));
        batches.push_lobe(orbital.orbital_type, model);
    }
}
