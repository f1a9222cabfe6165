use crate::core::io::scene::{AtomLabel, Scene, SceneAtom, SceneLobe};
use crate::core::models::molecule::Molecule;
use crate::engine::classifier::{Classification, compute_geometry};
use crate::engine::config::LayoutConfig;
use crate::engine::error::EngineError;
use crate::engine::instances::{InstanceBatches, instances_from_orbitals};
use crate::engine::orbitals::OrientedOrbital;
use crate::engine::placement::{BondedAtom, place_atoms};
use crate::engine::progress::{Phase, Progress, ProgressReporter};
use nalgebra::UnitQuaternion;
use tracing::{debug, info, instrument};

/// An atom's world transform together with its lobes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedAtom {
    pub placement: BondedAtom,
    pub orbitals: Vec<OrientedOrbital>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub classification: Classification,
    /// Central atom first, then the others in molecule order.
    pub atoms: Vec<PlacedAtom>,
}

impl Layout {
    pub fn placements(&self) -> Vec<BondedAtom> {
        self.atoms.iter().map(|a| a.placement).collect()
    }

    /// Expands the layout into mesh instances, reusing the generated lobes.
    pub fn instances(&self, config: &LayoutConfig) -> InstanceBatches {
        instances_from_orbitals(
            self.atoms
                .iter()
                .map(|placed| (&placed.placement, placed.orbitals.as_slice())),
            &config.scales,
        )
    }

    /// Builds the serializable report of this layout.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownAtom`] if `molecule` is not the molecule
    /// the layout was computed for.
    pub fn to_scene(&self, molecule: &Molecule) -> Result<Scene, EngineError> {
        let central_id = self.classification.central_atom;
        let central = molecule
            .atom(central_id)
            .ok_or(EngineError::UnknownAtom { atom: central_id })?;

        let atoms = self
            .atoms
            .iter()
            .map(|placed| {
                let id = placed.placement.atom;
                let atom = molecule
                    .atom(id)
                    .ok_or(EngineError::UnknownAtom { atom: id })?;
                let rotation = placed.placement.rotation;
                Ok(SceneAtom {
                    name: atom.name.clone(),
                    id: atom.id,
                    proton_count: atom.proton_count,
                    position: placed.placement.position.coords.into(),
                    rotation: quaternion_array(&rotation),
                    lobes: placed
                        .orbitals
                        .iter()
                        .map(|orbital| SceneLobe {
                            orbital_type: orbital.orbital_type.to_string(),
                            local_orientation: quaternion_array(&orbital.orientation),
                            world_orientation: quaternion_array(
                                &(rotation * orbital.orientation),
                            ),
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok(Scene {
            name: molecule.name().to_string(),
            geometry: self.classification.geometry.to_string(),
            central_atom: AtomLabel {
                name: central.name.clone(),
                id: central.id,
            },
            atoms,
        })
    }
}

fn quaternion_array(q: &UnitQuaternion<f64>) -> [f64; 4] {
    let q = q.quaternion();
    [q.i, q.j, q.k, q.w]
}

/// Classifies `molecule`, places every atom and generates every atom's lobes.
#[instrument(skip_all, name = "layout_workflow", fields(molecule = molecule.name()))]
pub fn run(
    molecule: &Molecule,
    config: &LayoutConfig,
    reporter: &ProgressReporter,
) -> Result<Layout, EngineError> {
    // === Phase 1: Central atom and shape ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::Classification,
    });
    let classification = compute_geometry(molecule)?;
    info!(
        geometry = %classification.geometry,
        atoms = molecule.len(),
        "Molecule classified."
    );
    if let Some(central) = molecule.atom(classification.central_atom) {
        reporter.report(Progress::Message(format!(
            "{} around {}#{}",
            classification.geometry, central.name, central.id
        )));
    }
    reporter.report(Progress::PhaseFinish {
        phase: Phase::Classification,
    });

    // === Phase 2: World transforms ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::Placement,
    });
    let placements = place_atoms(molecule, &classification, &config.placement)?;
    reporter.report(Progress::PhaseFinish {
        phase: Phase::Placement,
    });

    // === Phase 3: Lobes ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::Orbitals,
    });
    let total = placements.len();
    let mut atoms = Vec::with_capacity(total);
    for (index, placement) in placements.into_iter().enumerate() {
        let orbitals = placement.oriented_orbitals(molecule)?;
        debug!(atom = ?placement.atom, lobes = orbitals.len(), "Generated lobes");
        atoms.push(PlacedAtom {
            placement,
            orbitals,
        });
        reporter.report(Progress::AtomDone {
            completed: index + 1,
            total,
        });
    }
    reporter.report(Progress::PhaseFinish {
        phase: Phase::Orbitals,
    });

    info!("Layout complete.");
    Ok(Layout {
        classification,
        atoms,
    })
}
