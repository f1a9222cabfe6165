//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] data model and the
//! [`crate::engine`] stages together.
//!
//! - **Layout Workflow** ([`layout`]) - Classification, placement and lobe
//!   generation for one molecule in a single call, with progress events and
//!   export to a [`crate::core::io::scene::Scene`].

pub mod layout;
