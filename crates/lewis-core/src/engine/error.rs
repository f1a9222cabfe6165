use thiserror::Error;

use super::classifier::Geometry;
use crate::core::models::atom::Hybridization;
use crate::core::models::ids::AtomId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot compute geometry of an empty molecule")]
    EmptyMolecule,

    #[error("Could not determine a central atom for this molecule")]
    AmbiguousCentralAtom,

    #[error(
        "No geometry found for steric number {steric_number} with {lone_electrons} lone electron(s)"
    )]
    NoGeometryFound {
        steric_number: u32,
        lone_electrons: u32,
    },

    #[error("Orbital layout for {hybridization} hybridization is not supported")]
    UnsupportedHybridization { hybridization: Hybridization },

    #[error("Atom placement for {geometry} geometry is not supported")]
    UnsupportedGeometry { geometry: Geometry },

    #[error("{geometry} geometry places {expected} neighbour(s) but the molecule has {found}")]
    NeighbourCountMismatch {
        geometry: Geometry,
        expected: u32,
        found: u32,
    },

    #[error("Could not find an atom distinct from the central atom")]
    NoNonCentralAtomFound,

    #[error("Atom {atom:?} does not belong to this molecule")]
    UnknownAtom { atom: AtomId },
}
