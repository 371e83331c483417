//! Manifest additions produced by the composer

use super::versions::VersionTable;

/// Ordered name/value pairs. Inserting an existing name overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddSet(Vec<(String, String)>);

impl AddSet {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Entries to add to (or overwrite in) the project's package.json
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestMutation {
    pub dependencies: AddSet,
    pub dev_dependencies: AddSet,
    pub scripts: AddSet,
}

impl ManifestMutation {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty() && self.scripts.is_empty()
    }

    pub(crate) fn add_dependency(&mut self, package: &str, versions: &VersionTable) {
        self.dependencies.insert(package, versions.resolve(package));
    }

    pub(crate) fn add_dev_dependency(&mut self, package: &str, versions: &VersionTable) {
        self.dev_dependencies
            .insert(package, versions.resolve(package));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut set = AddSet::default();
        set.insert("a", "1");
        set.insert("b", "1");
        set.insert("a", "2");
        assert_eq!(set.iter().collect::<Vec<_>>(), [("a", "2"), ("b", "1")]);
    }

    #[test]
    fn test_add_dependency_uses_table() {
        let table = VersionTable::default();
        let mut mutation = ManifestMutation::default();
        mutation.add_dependency("wouter", &table);
        mutation.add_dependency("react-dnd", &table);
        assert_eq!(mutation.dependencies.get("wouter"), Some("2"));
        assert_eq!(mutation.dependencies.get("react-dnd"), Some("*"));
        assert!(!mutation.is_empty());
    }
}
