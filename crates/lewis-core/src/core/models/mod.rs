//! # Core Models Module
//!
//! Data structures describing a molecule as the geometry engine consumes it.
//!
//! ## Overview
//!
//! A [`molecule::Molecule`] owns its atoms in an arena and hands out
//! [`ids::AtomId`] handles. Bonds are directed adjacency entries stored per
//! atom and refer to their partner by handle, so no structure ever holds a
//! reference into another.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records and the [`atom::Hybridization`] ladder
//! - [`topology`] - Bond entries and bond types (sigma/pi)
//! - [`molecule`] - The immutable, ordered atom/bond graph
//! - [`builder`] - Incremental construction of a molecule
//! - [`ids`] - Arena handle types
//!
//! ## Usage
//!
//! ```
//! use lewisviz::core::models::{atom::{Atom, Hybridization}, builder::MoleculeBuilder, topology::BondType};
//!
//! let mut builder = MoleculeBuilder::new("HF");
//! let h = builder.add_atom(Atom::new("H", 0, 1, Hybridization::S));
//! let f = builder.add_atom(Atom::new("F", 0, 9, Hybridization::Sp3).with_lone_electrons(6));
//! builder.bond(h, f, BondType::Sigma).unwrap();
//! let molecule = builder.build();
//! assert_eq!(molecule.len(), 2);
//! ```

pub mod atom;
pub mod builder;
pub mod ids;
pub mod molecule;
pub mod topology;
