//! nestbuild - build order planning for nested solutions
//!
//! This crate computes the order in which the children of a solution must be
//! built so that every project comes after the projects it references, across
//! nested sub-solutions and named build configurations, and derives the
//! per-configuration subdirectory lists from that order.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for nestbuild unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use core::{
    BuildUnit, CompositeUnit, LeafUnit, SolutionBuilder, SolutionManifest, SolutionTree, UnitId,
};

pub use resolver::{Closure, OrderError, ResolutionSession, ResolvedOrder};
pub use util::context::GlobalContext;
