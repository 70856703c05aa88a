//! Test utilities for nestbuild unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use nestbuild::test_support::fixtures;
//!
//! #[test]
//! fn test_example() {
//!     let tree = fixtures::core_util_app();
//!     let mut session = ResolutionSession::new(&tree);
//!     // ...
//! }
//! ```

pub mod fixtures;

use crate::core::{SolutionTree, UnitId};

/// Names of `ids` in order.
pub fn names(tree: &SolutionTree, ids: &[UnitId]) -> Vec<String> {
    ids.iter().map(|id| tree.name(*id).to_string()).collect()
}
