//! Template assets: trees, stores, replication and the project manifest
//!
//! This module provides:
//! - In-memory template trees and the exclusion set
//! - Replication of trees onto disk
//! - Asset stores (local directory or remote bundle) and the root catalog
//! - The generated project's package.json document

pub mod catalog;
pub mod fetcher;
pub mod node;
pub mod package;
pub mod replicator;
pub mod store;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

pub use catalog::{AssetCatalog, BUNDLE_FILE, CATALOG_FILE};
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use node::{ExclusionSet, TemplateDir, TemplateNode};
pub use package::{PackageManifest, MANIFEST_FILE};
pub use replicator::{replicate, replicate_with_progress};
pub use store::{MemoryStore, TemplateStore};

/// Build the asset bundle for a local asset directory (for publishing)
pub fn build_bundle<C: ProductConfig>(config: &C, template_dir: &Option<PathBuf>) -> Result<PathBuf> {
    let dir = template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("assets"));

    if !dir.exists() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    let catalog_path = dir.join(CATALOG_FILE);
    let content = std::fs::read_to_string(&catalog_path)
        .with_context(|| format!("Failed to read {}", catalog_path.display()))?;
    let catalog = AssetCatalog::parse(&content)
        .with_context(|| format!("Failed to parse {}", catalog_path.display()))?;

    println!(
        "{}",
        format!("Building {} asset bundle...", config.display_name())
            .cyan()
            .bold()
    );

    let base = dir.join(catalog.base_asset_path());
    if !base.is_dir() {
        eprintln!(
            "{} Base template not found: {}",
            "Warning:".yellow(),
            base.display()
        );
    }

    let bytes = TemplateFetcher::build_local_bundle(&dir, &catalog.exclusions())
        .with_context(|| format!("Failed to bundle {}", dir.display()))?;
    let bundle_path = dir.join(BUNDLE_FILE);
    std::fs::write(&bundle_path, &bytes)
        .with_context(|| format!("Failed to write {}", bundle_path.display()))?;

    println!(
        "{} {} ({} bytes)",
        "Built".green().bold(),
        bundle_path.display(),
        bytes.len()
    );

    Ok(bundle_path)
}
