//! Boilerplate Core - template composition engine for React project scaffolding
//!
//! This library creates a new project directory from a base template, merges
//! feature overlays on top of it and adds the matching dependencies and
//! scripts to the generated package.json.
//!
//! # Architecture
//!
//! - **Composition** - [`composer::compose`] turns an [`AnswerSet`] into the
//!   overlays to apply and the manifest entries to add. Pure, no I/O.
//! - **Replication** - [`templates::replicate`] writes a template tree to disk,
//!   skipping excluded names. Later trees override earlier files.
//! - **Orchestration** - [`scaffold::create_project`] runs base copy, overlays
//!   and the manifest merge against any [`TemplateStore`].
//! - **CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use boilerplate_core::{answers::ProjectName, AnswerSet, TemplateFetcher};
//!
//! let mut fetcher = TemplateFetcher::from_local("assets".into(), "example");
//! let catalog = fetcher.fetch_catalog().await?;
//! let answers = AnswerSet::builder(ProjectName::parse("demo")?)
//!     .ui_library(true)
//!     .routing(true)
//!     .build();
//! let report = boilerplate_core::create_project(
//!     &mut fetcher, &catalog, &answers, Path::new("."), &mut |_: &Path| {},
//! ).await?;
//! ```

pub mod answers;
pub mod composer;
pub mod error;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerSet, DataFetcher, NativeMobile, ProjectName};
pub use composer::{compose, Composition, ManifestMutation, Overlay, OverlaySelection, VersionTable};
pub use error::{ScaffoldError, ScaffoldResult};
pub use product::ProductConfig;
pub use runtime::{check_runtimes, PackageManager, RuntimeInfo};
pub use scaffold::{create_project, ScaffoldReport};
pub use templates::{
    AssetCatalog, ExclusionSet, PackageManifest, TemplateDir, TemplateFetcher, TemplateNode,
    TemplateSource, TemplateStore,
};

#[cfg(feature = "tui")]
pub use tui::run;
