//! The generated project's package.json

use crate::composer::{AddSet, ManifestMutation};
use crate::error::{ScaffoldError, ScaffoldResult};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Manifest file name at the project root
pub const MANIFEST_FILE: &str = "package.json";

/// package.json loaded from disk, with key order preserved
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl PackageManifest {
    pub fn load(path: &Path) -> ScaffoldResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ScaffoldError::read_failed(path, e))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> ScaffoldResult<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| ScaffoldError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match value {
            Value::Object(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            _ => Err(ScaffoldError::Manifest {
                path: path.to_path_buf(),
                message: "top level is not an object".to_string(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry from a name -> string section such as `dependencies`
    pub fn entry(&self, section: &str, name: &str) -> Option<&str> {
        self.root.get(section)?.as_object()?.get(name)?.as_str()
    }

    /// Add or overwrite every entry of `mutation`. Existing keys are never removed.
    pub fn apply(&mut self, mutation: &ManifestMutation) -> ScaffoldResult<()> {
        let sections: [(&str, &AddSet); 3] = [
            ("dependencies", &mutation.dependencies),
            ("devDependencies", &mutation.dev_dependencies),
            ("scripts", &mutation.scripts),
        ];

        // Shape check first so a bad section leaves the document untouched
        for (section, _) in sections.iter().filter(|(_, set)| !set.is_empty()) {
            if let Some(existing) = self.root.get(*section) {
                if !existing.is_object() {
                    return Err(ScaffoldError::Manifest {
                        path: self.path.clone(),
                        message: format!("`{}` is not an object", section),
                    });
                }
            }
        }

        for (section, set) in sections {
            if set.is_empty() {
                continue;
            }
            let entry = self
                .root
                .entry(section)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = entry {
                for (name, value) in set.iter() {
                    map.insert(name.to_string(), Value::String(value.to_string()));
                }
            }
            tracing::debug!(section, count = set.len(), "merged manifest entries");
        }

        Ok(())
    }

    /// Serialized form: two-space indentation with a trailing newline
    pub fn to_pretty_string(&self) -> String {
        // A map of JSON values always serializes
        let mut out = serde_json::to_string_pretty(&self.root).unwrap_or_default();
        out.push('\n');
        out
    }

    pub fn save(&self) -> ScaffoldResult<()> {
        std::fs::write(&self.path, self.to_pretty_string())
            .map_err(|e| ScaffoldError::write_failed(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::VersionTable;

    fn manifest(json: &str) -> PackageManifest {
        PackageManifest::parse(Path::new("package.json"), json).unwrap()
    }

    fn mutation_with_dependency(name: &str, version: &str) -> ManifestMutation {
        let mut mutation = ManifestMutation::default();
        mutation.dependencies.insert(name, version);
        mutation
    }

    #[test]
    fn test_apply_preserves_existing_dependencies() {
        let mut pkg = manifest(r#"{"dependencies":{"foo":"1.0"}}"#);
        pkg.apply(&mutation_with_dependency("bar", "2.0")).unwrap();

        assert_eq!(pkg.entry("dependencies", "foo"), Some("1.0"));
        assert_eq!(pkg.entry("dependencies", "bar"), Some("2.0"));
        assert_eq!(
            serde_json::from_str::<Value>(&pkg.to_pretty_string()).unwrap(),
            serde_json::json!({"dependencies": {"foo": "1.0", "bar": "2.0"}})
        );
    }

    #[test]
    fn test_apply_overwrites_same_key() {
        let mut pkg = manifest(r#"{"dependencies":{"zustand":"2"}}"#);
        pkg.apply(&mutation_with_dependency("zustand", "3")).unwrap();
        assert_eq!(pkg.entry("dependencies", "zustand"), Some("3"));
    }

    #[test]
    fn test_apply_creates_missing_sections() {
        let mut pkg = manifest(r#"{"name":"demo"}"#);
        let mut mutation = ManifestMutation::default();
        mutation.add_dev_dependency("@types/wouter", &VersionTable::default());
        mutation.scripts.insert("android", "cap run android");
        pkg.apply(&mutation).unwrap();

        assert_eq!(pkg.entry("devDependencies", "@types/wouter"), Some("2"));
        assert_eq!(pkg.entry("scripts", "android"), Some("cap run android"));
        assert!(pkg.root.get("dependencies").is_none());
    }

    #[test]
    fn test_key_order_is_preserved() {
        let mut pkg = manifest(r#"{"name":"demo","scripts":{"start":"react-scripts start"},"dependencies":{"react":"17"}}"#);
        pkg.apply(&mutation_with_dependency("wouter", "2")).unwrap();

        let out = pkg.to_pretty_string();
        let name = out.find("\"name\"").unwrap();
        let scripts = out.find("\"scripts\"").unwrap();
        let react = out.find("\"react\"").unwrap();
        let wouter = out.find("\"wouter\"").unwrap();
        assert!(name < scripts && scripts < react && react < wouter);
        assert!(out.contains("\n  \"name\": \"demo\""));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_non_object_section_is_rejected_without_changes() {
        let mut pkg = manifest(r#"{"dependencies":{"react":"17"},"scripts":"nope"}"#);
        let mut mutation = mutation_with_dependency("wouter", "2");
        mutation.scripts.insert("ios", "cap run ios");

        let err = pkg.apply(&mutation).unwrap_err();
        assert!(matches!(err, ScaffoldError::Manifest { .. }));
        assert_eq!(pkg.entry("dependencies", "wouter"), None);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let err = PackageManifest::parse(Path::new("package.json"), "[]").unwrap_err();
        assert!(matches!(err, ScaffoldError::Manifest { .. }));
        assert!(PackageManifest::parse(Path::new("package.json"), "{").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, r#"{"dependencies":{}}"#).unwrap();

        let mut pkg = PackageManifest::load(&path).unwrap();
        pkg.apply(&mutation_with_dependency("fuse.js", "*")).unwrap();
        pkg.save().unwrap();

        let reloaded = PackageManifest::load(&path).unwrap();
        assert_eq!(reloaded.entry("dependencies", "fuse.js"), Some("*"));
    }

    #[test]
    fn test_load_missing_file_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackageManifest::load(&dir.path().join(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(err, ScaffoldError::ReadFailed { .. }));
    }
}
