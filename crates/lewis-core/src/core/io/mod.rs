//! Provides input/output for molecules and their computed layouts.
//!
//! Molecules arrive as solver JSON, which names elements by symbol, so
//! reading one requires an [`elements::ElementTable`]. Layouts leave as a
//! [`scene::Scene`] document. File formats share the
//! [`traits::MolecularFile`] interface.

pub mod elements;
pub mod json;
pub mod scene;
pub mod traits;
