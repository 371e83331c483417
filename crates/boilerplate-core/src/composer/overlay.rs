//! Overlay identifiers and ordered selections

use std::fmt;

/// Where an overlay lives in the asset store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Standalone module owned by a single feature
    Addon,
    /// Combined tree for a set of features that must be merged together
    Variation,
}

impl OverlayKind {
    /// Top-level asset store directory for this kind
    pub fn asset_dir(&self) -> &'static str {
        match self {
            OverlayKind::Addon => "addonModules",
            OverlayKind::Variation => "variations",
        }
    }
}

/// A tree merged on top of the base template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Overlay {
    kind: OverlayKind,
    name: String,
    target: &'static str,
}

/// Variations always replace files under the project's source directory
const VARIATION_TARGET: &str = "src";

impl Overlay {
    /// Addon overlay copied into `target` (relative to the project root, "" for the root itself)
    pub fn addon(name: impl Into<String>, target: &'static str) -> Self {
        Self {
            kind: OverlayKind::Addon,
            name: name.into(),
            target,
        }
    }

    pub fn variation(name: impl Into<String>) -> Self {
        Self {
            kind: OverlayKind::Variation,
            name: name.into(),
            target: VARIATION_TARGET,
        }
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Destination directory relative to the project root
    pub fn target(&self) -> &str {
        self.target
    }

    /// Path of this overlay's tree inside the asset store
    pub fn asset_path(&self) -> String {
        format!("{}/{}", self.kind.asset_dir(), self.name)
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered overlays for one run: addons first, then at most one variation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySelection(Vec<Overlay>);

impl OverlaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless the same overlay is already selected
    pub(crate) fn push(&mut self, overlay: Overlay) {
        if !self.0.contains(&overlay) {
            self.0.push(overlay);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Overlay> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay names in application order
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Overlay::name).collect()
    }
}

impl<'a> IntoIterator for &'a OverlaySelection {
    type Item = &'a Overlay;
    type IntoIter = std::slice::Iter<'a, Overlay>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
