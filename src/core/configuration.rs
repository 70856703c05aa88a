//! Named build configurations of a composite.

use crate::core::unit::UnitId;

/// One child's participation in a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationEntry {
    unit: UnitId,
    participates: bool,
}

impl ConfigurationEntry {
    pub fn new(unit: UnitId, participates: bool) -> Self {
        ConfigurationEntry { unit, participates }
    }

    /// The child unit this entry refers to.
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// `false` when the child is excluded from this configuration's build.
    pub fn participates(&self) -> bool {
        self.participates
    }
}

/// A named build variant of a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    name: String,
    entries: Vec<ConfigurationEntry>,
}

impl Configuration {
    pub fn new(name: impl Into<String>, entries: Vec<ConfigurationEntry>) -> Self {
        Configuration {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[ConfigurationEntry] {
        &self.entries
    }

    /// Find the entry for a child unit.
    pub fn entry(&self, unit: UnitId) -> Option<&ConfigurationEntry> {
        self.entries.iter().find(|e| e.unit == unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_lookup() {
        let a = UnitId::new(1);
        let b = UnitId::new(2);
        let config = Configuration::new(
            "Debug",
            vec![ConfigurationEntry::new(a, true), ConfigurationEntry::new(b, false)],
        );

        assert_eq!(config.name(), "Debug");
        assert!(config.entry(a).unwrap().participates());
        assert!(!config.entry(b).unwrap().participates());
        assert!(config.entry(UnitId::new(3)).is_none());
    }
}
