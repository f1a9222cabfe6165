//! # Core Module
//!
//! The stateless foundation of the library: the molecular data model and the
//! readers and writers that move molecules and layouts in and out of files.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds and the molecule graph
//! - **File I/O** ([`io`]) - Element tables, solver JSON ingestion and scene export
//!
//! Nothing in this module knows about geometry; see [`crate::engine`] for that.

pub mod io;
pub mod models;
