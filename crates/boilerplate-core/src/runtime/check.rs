//! Runtime detection for Node.js and the package managers

use super::package_manager::PackageManager;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// "Name (version)" or "Name (not installed)"
    pub fn summary(&self) -> String {
        if self.available {
            format!("{} ({})", self.name, self.version.as_deref().unwrap_or("unknown"))
        } else {
            format!("{} (not installed)", self.name)
        }
    }
}

/// Run `<program> --version` and report what came back
fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if the given package manager is available
pub fn check_package_manager(package_manager: PackageManager) -> RuntimeInfo {
    probe(package_manager.display_name(), package_manager.program())
}

/// Check Node.js and the chosen package manager.
///
/// Missing runtimes are reported, not treated as errors: the project can be
/// generated without them and installed later.
pub fn check_runtimes(package_manager: PackageManager) -> Vec<RuntimeInfo> {
    let results = vec![check_node(), check_package_manager(package_manager)];
    for missing in results.iter().filter(|r| !r.available) {
        tracing::warn!(runtime = missing.name, "runtime not found on PATH");
    }
    results
}
