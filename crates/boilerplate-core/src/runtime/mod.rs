//! Runtime detection and the package manager collaborator
//!
//! This module provides:
//! - Node.js and package manager detection
//! - Dependency installation in the generated project

pub mod check;
pub mod package_manager;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use package_manager::PackageManager;
