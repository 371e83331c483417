//! Manifest composition
//!
//! Turns an [`AnswerSet`] into the overlays to apply and the package.json
//! entries to add. Nothing here touches the filesystem; whether an overlay
//! actually exists in the asset store is checked when it is loaded.

pub mod feature;
pub mod mutation;
pub mod overlay;
pub mod versions;

use crate::answers::AnswerSet;

pub use feature::{Feature, EXTRA_PACKAGES};
pub use mutation::{AddSet, ManifestMutation};
pub use overlay::{Overlay, OverlayKind, OverlaySelection};
pub use versions::{VersionTable, WILDCARD};

/// Separator between short ids in a variation name
pub const VARIATION_SEPARATOR: &str = "-";

/// Result of composing one answer set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub overlays: OverlaySelection,
    pub mutation: ManifestMutation,
}

/// Compute overlays and manifest additions for `answers`
pub fn compose(answers: &AnswerSet, versions: &VersionTable) -> Composition {
    let mut overlays = OverlaySelection::new();
    let mut mutation = ManifestMutation::default();
    let mut variation_ids: Vec<&'static str> = Vec::new();

    for feature in Feature::PRIORITY {
        if !feature.is_enabled(answers) {
            continue;
        }

        for package in feature.dependencies() {
            mutation.add_dependency(package, versions);
        }
        for package in feature.dev_dependencies() {
            mutation.add_dev_dependency(package, versions);
        }
        if feature.is_composable() {
            variation_ids.push(feature.short_id());
        }
        if let Some(addon) = feature.addon_overlay() {
            tracing::debug!(feature = feature.short_id(), overlay = %addon, "selected addon overlay");
            overlays.push(addon);
        }
    }

    if let Some(native) = answers.native_mobile() {
        if native.android {
            mutation.add_dependency(feature::ANDROID_PACKAGE, versions);
            let (name, command) = feature::ANDROID_SCRIPT;
            mutation.scripts.insert(name, command);
        }
        if native.ios {
            mutation.add_dependency(feature::IOS_PACKAGE, versions);
            let (name, command) = feature::IOS_SCRIPT;
            mutation.scripts.insert(name, command);
        }
    }

    for package in feature::data_fetcher_packages(answers.data_fetcher()) {
        mutation.add_dependency(package, versions);
    }

    for package in answers.extra_packages() {
        mutation.add_dependency(package, versions);
    }

    if !variation_ids.is_empty() {
        let variation = Overlay::variation(variation_ids.join(VARIATION_SEPARATOR));
        tracing::debug!(overlay = %variation, "selected variation overlay");
        overlays.push(variation);
    }

    Composition { overlays, mutation }
}
