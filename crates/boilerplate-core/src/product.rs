//! What the binary tells the engine about the boilerplate it ships

use crate::runtime::PackageManager;
use std::path::Path;

/// Identity, asset location and post-creation hints of a boilerplate product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Command name, also used as the HTTP user agent
    fn name(&self) -> &'static str;

    /// Shown in the intro banner and bundle output
    fn display_name(&self) -> &'static str;

    /// Asset store URL used when the override variable is unset
    fn default_template_url(&self) -> &'static str;

    /// Environment variable overriding the asset store URL
    fn template_url_env(&self) -> &'static str;

    /// Lines printed after the project is written
    fn next_steps(&self, dir: &Path, package_manager: PackageManager, installed: bool)
        -> Vec<String>;

    fn cli_description(&self) -> &'static str;

    /// Shown when the asset catalog expects a newer CLI
    fn upgrade_command(&self) -> &'static str;

    /// Package manager preselected in the prompt and used under `--yes`
    fn package_manager(&self) -> PackageManager {
        PackageManager::default()
    }

    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
