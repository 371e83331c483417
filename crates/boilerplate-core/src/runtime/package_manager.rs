//! Package manager invocation for the generated project

use crate::error::{ScaffoldError, ScaffoldResult};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// How many trailing stderr lines to keep in a failure message
const STDERR_TAIL_LINES: usize = 10;

/// Supported package managers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PackageManager {
    #[default]
    Yarn,
    Npm,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Yarn,
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    /// Binary name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "Yarn",
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "Bun",
        }
    }

    /// Command line that installs dependencies
    pub fn install_command(&self) -> String {
        format!("{} install", self.program())
    }

    /// Command line that runs a package.json script
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            _ => format!("{} {}", self.program(), script),
        }
    }

    /// Install dependencies in `project_dir`.
    ///
    /// Output is captured; on failure the tail of stderr ends up in the error.
    pub async fn install(&self, project_dir: &Path) -> ScaffoldResult<()> {
        let command = self.install_command();
        tracing::info!(%command, dir = %project_dir.display(), "installing dependencies");

        let output = TokioCommand::new(self.program())
            .arg("install")
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ScaffoldError::PackageManager {
                command: command.clone(),
                message: format!("could not start {}: {}", self.program(), e),
            })?;

        if output.status.success() {
            tracing::info!(%command, "dependencies installed");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
        let message = match output.status.code() {
            Some(code) => format!("exited with code {}\n{}", code, tail),
            None => format!("terminated by signal\n{}", tail),
        };
        tracing::error!(%command, status = ?output.status.code(), "dependency installation failed");

        Err(ScaffoldError::PackageManager { command, message })
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
