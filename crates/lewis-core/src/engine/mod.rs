//! # Engine Module
//!
//! The molecular geometry engine: from an atom/bond graph to a VSEPR shape
//! and a world transform for every atom and every orbital lobe.
//!
//! ## Overview
//!
//! A query runs in three stages, each a pure function of the molecule:
//!
//! 1. [`selector`] picks the central atom.
//! 2. [`classifier`] turns the steric number and lone electrons of that atom
//!    into a [`classifier::Geometry`].
//! 3. [`placement`] positions and rotates every atom for that geometry.
//!
//! [`solver`] produces the molecule in the first place: it builds a Lewis
//! structure from a formula and a net charge.
//!
//! [`orbitals`] supplies each atom's local lobe layout from its
//! hybridization, and [`instances`] combines placements and lobes into model
//! matrices ready for a renderer.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Shift distances, lobe scales and the centralize flag
//! - **Error Handling** ([`error`]) - The single error type shared by all stages
//! - **Progress Monitoring** ([`progress`]) - Phase events for long-running callers
//!
//! Nothing here is stateful or cached, so molecules may be processed on
//! independent threads without synchronization.

pub mod classifier;
pub mod config;
pub mod error;
pub mod instances;
pub mod orbitals;
pub mod placement;
pub mod progress;
pub mod selector;
pub mod solver;
