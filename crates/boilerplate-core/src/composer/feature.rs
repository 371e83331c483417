//! Boolean features and what each one contributes

use super::overlay::Overlay;
use crate::answers::{AnswerSet, DataFetcher};

/// Packages offered in the "other useful packages" multi-select: (package, description)
pub const EXTRA_PACKAGES: &[(&str, &str)] = &[
    ("react-spring", "physically based animations"),
    ("@mdi/js", "icon paths compatible with foundry-ui"),
    ("polished", "color management"),
    ("use-gesture", "gesture support"),
    ("react-dnd", "drag and drop support on touch/mouse"),
    ("fuse.js", "fuzzy-search client-side data"),
];

/// Script entries added for each native platform: (script name, command)
pub const ANDROID_SCRIPT: (&str, &str) = ("android", "cap run android");
pub const IOS_SCRIPT: (&str, &str) = ("ios", "cap run ios");

pub const ANDROID_PACKAGE: &str = "@capacitor/android";
pub const IOS_PACKAGE: &str = "@capacitor/ios";

/// Boolean features of the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    UiLibrary,
    StateManagement,
    Routing,
    NativeMobile,
}

impl Feature {
    /// Order in which features are applied. Also fixes the variation name order.
    pub const PRIORITY: [Feature; 4] = [
        Feature::UiLibrary,
        Feature::StateManagement,
        Feature::Routing,
        Feature::NativeMobile,
    ];

    /// Identifier used in overlay and variation names
    pub fn short_id(&self) -> &'static str {
        match self {
            Feature::UiLibrary => "foundry",
            Feature::StateManagement => "zustand",
            Feature::Routing => "wouter",
            Feature::NativeMobile => "capacitor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::UiLibrary => "Foundry UI",
            Feature::StateManagement => "State management with zustand",
            Feature::Routing => "Page routing with wouter",
            Feature::NativeMobile => "Native mobile with Capacitor",
        }
    }

    pub fn dependencies(&self) -> &'static [&'static str] {
        match self {
            Feature::UiLibrary => &["@headstorm/foundry-react-ui"],
            Feature::StateManagement => &["zustand"],
            Feature::Routing => &["wouter"],
            Feature::NativeMobile => &["@capacitor/core"],
        }
    }

    pub fn dev_dependencies(&self) -> &'static [&'static str] {
        match self {
            Feature::Routing => &["@types/wouter"],
            Feature::NativeMobile => &["@capacitor/cli"],
            Feature::UiLibrary | Feature::StateManagement => &[],
        }
    }

    /// Standalone overlay merged independently of other features
    pub fn addon_overlay(&self) -> Option<Overlay> {
        match self {
            Feature::StateManagement => Some(Overlay::addon(self.short_id(), "src")),
            Feature::Routing => Some(Overlay::addon(self.short_id(), "src")),
            Feature::NativeMobile => Some(Overlay::addon(self.short_id(), "")),
            Feature::UiLibrary => None,
        }
    }

    /// Whether this feature takes part in the combined variation overlay
    pub fn is_composable(&self) -> bool {
        matches!(self, Feature::UiLibrary | Feature::Routing)
    }

    pub fn is_enabled(&self, answers: &AnswerSet) -> bool {
        match self {
            Feature::UiLibrary => answers.ui_library(),
            Feature::StateManagement => answers.state_management(),
            Feature::Routing => answers.routing(),
            Feature::NativeMobile => answers.native_mobile().is_some(),
        }
    }
}

/// Packages added for the chosen data fetcher
pub fn data_fetcher_packages(fetcher: DataFetcher) -> &'static [&'static str] {
    match fetcher {
        DataFetcher::Json => &["react-query"],
        DataFetcher::Graphql => &["graphql-request", "graphql"],
        DataFetcher::None => &[],
    }
}
