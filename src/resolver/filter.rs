//! Configuration filtering.
//!
//! Two questions gate what the resolver looks at: whether a configuration is
//! recognized by the build context at all ([`ConfigurationPolicy`], decided
//! before any ordering happens), and whether a given child participates in a
//! configuration (the entry's own flag).

use std::collections::BTreeSet;

use crate::core::{Configuration, ConfigurationEntry, SolutionTree, UnitId};

/// Decides which configuration names the build context recognizes.
pub trait ConfigurationPolicy {
    fn is_supported(&self, configuration: &str) -> bool;
}

/// Every configuration is supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllConfigurations;

impl ConfigurationPolicy for AllConfigurations {
    fn is_supported(&self, _configuration: &str) -> bool {
        true
    }
}

/// Only the listed configurations are supported. An empty list allows all.
#[derive(Debug, Clone, Default)]
pub struct SupportedConfigurations {
    names: BTreeSet<String>,
}

impl SupportedConfigurations {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SupportedConfigurations {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ConfigurationPolicy for SupportedConfigurations {
    fn is_supported(&self, configuration: &str) -> bool {
        self.names.is_empty() || self.names.contains(configuration)
    }
}

impl<F> ConfigurationPolicy for F
where
    F: Fn(&str) -> bool,
{
    fn is_supported(&self, configuration: &str) -> bool {
        self(configuration)
    }
}

/// Entries of `configuration` whose child takes part in the build.
pub fn participating(
    configuration: &Configuration,
) -> impl Iterator<Item = &ConfigurationEntry> {
    configuration.entries().iter().filter(|e| e.participates())
}

/// Whether `unit` participates in `parent`'s configuration named `configuration`.
///
/// A parent lacking the configuration, or one that does not list the unit,
/// has nothing participating.
pub fn participates(
    tree: &SolutionTree,
    parent: UnitId,
    unit: UnitId,
    configuration: &str,
) -> bool {
    tree.configuration(parent, configuration)
        .and_then(|c| c.entry(unit))
        .is_some_and(ConfigurationEntry::participates)
}
