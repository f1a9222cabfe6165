//! # Lewis Structure Geometry Library
//!
//! Turns the bonding graph of a small molecule into a three-dimensional
//! picture: the VSEPR shape around its central atom, a world position and
//! rotation for every atom, and an orientation for every orbital lobe.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout, each depending only on
//! the ones before it.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Atom`,
//!   `Bond`) held in an arena and addressed by handles, plus I/O for element
//!   tables, solver JSON and scene export.
//!
//! - **[`engine`]: The Logic Core.** Lewis structure solving from a formula,
//!   then pure functions over the molecule: central atom selection, geometry
//!   classification, atom placement, lobe generation and mesh instance
//!   matrices.
//!
//! - **[`workflows`]: The Public API.** One call that runs every engine stage
//!   in order and reports progress, producing a `Layout` that can be exported
//!   as a `Scene`.

pub mod core;
pub mod engine;
pub mod workflows;
