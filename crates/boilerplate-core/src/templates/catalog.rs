//! Asset store catalog (template.yaml at the store root)

use crate::composer::VersionTable;
use crate::error::ScaffoldResult;
use crate::templates::node::ExclusionSet;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog file name at the root of the asset store
pub const CATALOG_FILE: &str = "template.yaml";

/// Bundle file holding every asset tree of the store
pub const BUNDLE_FILE: &str = "assets.zip";

/// Directory under which base templates live
pub const BASE_TEMPLATES_DIR: &str = "templates";

fn default_base() -> String {
    "base".to_string()
}

/// Root catalog describing the asset store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCatalog {
    /// Display name of the boilerplate
    pub name: String,

    /// Short description shown in the intro
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Base template directory under `templates/`
    #[serde(default = "default_base")]
    pub base: String,

    /// Extra names never copied (added to the built-in exclusions)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Version pins overriding the built-in table
    #[serde(default)]
    pub versions: BTreeMap<String, String>,
}

impl AssetCatalog {
    pub fn parse(content: &str) -> ScaffoldResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Store path of the base template
    pub fn base_asset_path(&self) -> String {
        format!("{}/{}", BASE_TEMPLATES_DIR, self.base)
    }

    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::default().with_extra(self.exclude.iter().cloned())
    }

    pub fn version_table(&self) -> VersionTable {
        VersionTable::default().with_overrides(self.versions.clone())
    }

    /// Warning text when `cli_version` is older than the assets expect.
    ///
    /// Either version failing to parse means no warning.
    pub fn compatibility_warning(&self, cli_version: &str, upgrade_command: &str) -> Option<String> {
        let cli = lenient_version(cli_version)?;
        let wanted = lenient_version(&self.version)?;

        (cli < wanted).then(|| {
            format!(
                "{} needs CLI {} or newer (running {}). Upgrade with: {}",
                self.name, self.version, cli_version, upgrade_command
            )
        })
    }
}

fn lenient_version(raw: &str) -> Option<Version> {
    let raw = raw.trim();
    Version::parse(raw.strip_prefix('v').unwrap_or(raw)).ok()
}
