//! Pinned dependency versions

use std::collections::BTreeMap;

/// Constraint used for any package without a pin
pub const WILDCARD: &str = "*";

/// Built-in pins, keyed by package name
const DEFAULT_PINS: &[(&str, &str)] = &[
    ("@headstorm/foundry-react-ui", "1"),
    ("zustand", "3"),
    ("wouter", "2"),
    ("@types/wouter", "2"),
    ("react-query", "3"),
    ("graphql-request", "4"),
    ("graphql", "16"),
    ("@capacitor/core", "3"),
    ("@capacitor/cli", "3"),
    ("@capacitor/android", "3"),
    ("@capacitor/ios", "3"),
];

/// Package name to version constraint lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    pins: BTreeMap<String, String>,
}

impl Default for VersionTable {
    fn default() -> Self {
        Self {
            pins: DEFAULT_PINS
                .iter()
                .map(|(name, version)| (name.to_string(), version.to_string()))
                .collect(),
        }
    }
}

impl VersionTable {
    /// A table with no pins at all; every lookup is a wildcard
    pub fn empty() -> Self {
        Self {
            pins: BTreeMap::new(),
        }
    }

    /// Replace or add pins (later entries win)
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pins
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Version constraint for `package`, or [`WILDCARD`] when unpinned
    pub fn resolve(&self, package: &str) -> &str {
        self.pins.get(package).map(String::as_str).unwrap_or(WILDCARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pin_feature_packages() {
        let table = VersionTable::default();
        assert_eq!(table.resolve("zustand"), "3");
        assert_eq!(table.resolve("@types/wouter"), "2");
    }

    #[test]
    fn test_unknown_package_is_wildcard() {
        assert_eq!(VersionTable::default().resolve("fuse.js"), WILDCARD);
        assert_eq!(VersionTable::empty().resolve("zustand"), WILDCARD);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let table = VersionTable::default().with_overrides([("zustand", "4"), ("polished", "4.1")]);
        assert_eq!(table.resolve("zustand"), "4");
        assert_eq!(table.resolve("polished"), "4.1");
        assert_eq!(table.resolve("wouter"), "2");
    }
}
