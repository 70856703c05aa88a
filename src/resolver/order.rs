//! Fixed-point ordering of a composite's children.
//!
//! Children are scanned in declaration order, pass after pass. A child is
//! placed as soon as everything it requires has been provided by children
//! placed before it. Units with no relative dependency therefore keep their
//! declaration order. A pass that places nothing while children are still
//! pending means no valid order exists.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::core::{CompositeUnit, UnitId};
use crate::resolver::errors::OrderError;
use crate::resolver::filter;
use crate::resolver::ResolutionSession;

/// The resolved build order of one composite under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOrder {
    /// Composite that was ordered
    pub parent: UnitId,
    /// Configuration name
    pub configuration: String,
    /// Participating children, dependencies first
    pub order: Vec<UnitId>,
    /// The child sharing the parent's directory, if any
    pub colocated: Option<UnitId>,
}

impl ResolvedOrder {
    /// Children that live in a genuine subdirectory, in build order.
    pub fn subdirectories(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(move |id| Some(*id) != self.colocated)
    }
}

impl<'a> ResolutionSession<'a> {
    fn composite(&self, id: UnitId) -> Result<&'a CompositeUnit, OrderError> {
        let tree = self.tree;
        tree.composite(id).ok_or_else(|| OrderError::NotAComposite {
            unit: tree.name(id).to_string(),
        })
    }

    /// Order the direct children of `parent` under `configuration`.
    ///
    /// On failure the error names the last child found blocked in the stalled
    /// pass, which is not necessarily the root of the cycle.
    pub fn order_children(
        &mut self,
        parent: UnitId,
        configuration: &str,
    ) -> Result<Vec<UnitId>, OrderError> {
        let tree = self.tree;
        let composite = self.composite(parent)?;
        let config = composite.configuration(configuration).ok_or_else(|| {
            OrderError::ConfigurationNotFound {
                unit: composite.name().to_string(),
                configuration: configuration.to_string(),
            }
        })?;

        let mut ordered = Vec::new();
        let mut placed = HashSet::new();
        let mut satisfied = BTreeSet::new();
        let mut pass = 0usize;

        loop {
            pass += 1;
            let mut progress = false;
            let mut witness = None;

            for entry in filter::participating(config) {
                let id = entry.unit();
                if placed.contains(&id) {
                    continue;
                }
                // A nested composite without this configuration is absent
                // from it, not pending.
                if !tree.unit(id).has_configuration(configuration) {
                    continue;
                }

                let closure = self.closure_of(id, configuration);
                if closure.is_satisfied_by(&satisfied) {
                    tracing::debug!(
                        "placing `{}` at position {} of `{}` ({})",
                        tree.name(id),
                        ordered.len(),
                        composite.name(),
                        configuration
                    );
                    satisfied.extend(closure.provides().iter().cloned());
                    ordered.push(id);
                    placed.insert(id);
                    progress = true;
                } else {
                    tracing::trace!(
                        "`{}` waits on {:?} in pass {}",
                        tree.name(id),
                        closure.missing(&satisfied).collect::<Vec<_>>(),
                        pass
                    );
                    witness = Some(id);
                }
            }

            match witness {
                None => return Ok(ordered),
                Some(id) if !progress => {
                    return Err(OrderError::UnsatisfiableOrder {
                        witness: tree.name(id).to_string(),
                        configuration: configuration.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    /// Resolve the build order of `parent` and pick out its co-located child.
    ///
    /// A child whose directory equals the parent's base directory is merged
    /// into the parent's own build description. At most one is allowed; the
    /// check runs before ordering.
    pub fn resolve_order(
        &mut self,
        parent: UnitId,
        configuration: &str,
    ) -> Result<ResolvedOrder, OrderError> {
        let tree = self.tree;
        let composite = self.composite(parent)?;

        let mut colocated: Option<UnitId> = None;
        if let Some(config) = composite.configuration(configuration) {
            for entry in filter::participating(config) {
                let id = entry.unit();
                let unit = tree.unit(id);
                // A nested composite without this configuration is absent.
                if !unit.has_configuration(configuration) {
                    continue;
                }
                if unit.base_dir() != composite.base_dir() {
                    continue;
                }
                if let Some(first) = colocated {
                    return Err(OrderError::MultipleColocatedUnits {
                        parent: composite.name().to_string(),
                        first: tree.name(first).to_string(),
                        second: tree.name(id).to_string(),
                    });
                }
                colocated = Some(id);
            }
        }

        let order = self.order_children(parent, configuration)?;

        tracing::debug!(
            "resolved `{}` ({}): {} children",
            composite.name(),
            configuration,
            order.len()
        );

        Ok(ResolvedOrder {
            parent,
            configuration: configuration.to_string(),
            order,
            colocated,
        })
    }
}
