//! Sibling dependency graphs.
//!
//! Builds the graph the resolver walks implicitly: one node per participating
//! child of a composite, one edge from each child to every sibling that
//! provides something it requires. Edge weights count the names the
//! provider satisfies.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::UnitId;
use crate::resolver::{filter, Closure, OrderError, ResolutionSession};

/// Dependencies between the children of one composite.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<String, usize>,
    nodes: HashMap<String, NodeIndex>,
    unresolved: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Number of children in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `unit` is a node of the graph.
    pub fn contains(&self, unit: &str) -> bool {
        self.nodes.contains_key(unit)
    }

    /// Siblings `unit` depends on, sorted by name.
    pub fn dependencies_of(&self, unit: &str) -> Vec<&str> {
        let Some(&node) = self.nodes.get(unit) else {
            return Vec::new();
        };
        let mut deps: Vec<&str> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        deps.sort_unstable();
        deps
    }

    /// Requirements no sibling provides, by child.
    pub fn unresolved(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.unresolved
    }

    /// Render as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}

/// Build the dependency graph of `parent`'s children under `configuration`.
pub fn dependency_graph(
    session: &mut ResolutionSession<'_>,
    parent: UnitId,
    configuration: &str,
) -> Result<DependencyGraph, OrderError> {
    let tree = session.tree();
    let composite = tree.composite(parent).ok_or_else(|| OrderError::NotAComposite {
        unit: tree.name(parent).to_string(),
    })?;
    let config = composite.configuration(configuration).ok_or_else(|| {
        OrderError::ConfigurationNotFound {
            unit: composite.name().to_string(),
            configuration: configuration.to_string(),
        }
    })?;

    let children: Vec<(String, Closure)> = filter::participating(config)
        .map(|e| e.unit())
        .filter(|id| tree.unit(*id).has_configuration(configuration))
        .map(|id| (tree.name(id).to_string(), session.closure_of(id, configuration)))
        .collect();

    let mut graph = DiGraph::new();
    let mut nodes = HashMap::new();
    for (name, _) in &children {
        nodes.insert(name.clone(), graph.add_node(name.clone()));
    }

    let mut unresolved = BTreeMap::new();
    for (name, closure) in &children {
        let mut missing = closure.requires().clone();
        for (other, other_closure) in &children {
            if other == name || closure.requires().is_disjoint(other_closure.provides()) {
                continue;
            }
            let shared = closure
                .requires()
                .intersection(other_closure.provides())
                .count();
            graph.add_edge(nodes[name], nodes[other], shared);
            missing.retain(|req| !other_closure.provides().contains(req));
        }
        if !missing.is_empty() {
            unresolved.insert(name.clone(), missing);
        }
    }

    tracing::debug!(
        "dependency graph of `{}` ({}): {} nodes, {} edges",
        composite.name(),
        configuration,
        graph.node_count(),
        graph.edge_count()
    );

    Ok(DependencyGraph {
        graph,
        nodes,
        unresolved,
    })
}
