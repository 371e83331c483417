//! Questionnaire answers
//!
//! An [`AnswerSet`] is built once from the prompts (or CLI flags) and is
//! never mutated afterwards. The composer reads it, nothing writes it.

use crate::error::{ScaffoldError, ScaffoldResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Validated project name. Always a single, non-empty path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Check the name's shape (not its availability on disk)
    pub fn parse(name: &str) -> ScaffoldResult<Self> {
        let trimmed = name.trim();
        let invalid = |reason| ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(invalid("name must not be a relative directory reference"));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(invalid("name must not contain path separators"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destination path for this project under `parent`
    pub fn destination(&self, parent: &Path) -> PathBuf {
        parent.join(&self.0)
    }

    /// Parse the name and make sure nothing already exists at `parent/name`
    pub fn parse_available(name: &str, parent: &Path) -> ScaffoldResult<Self> {
        let parsed = Self::parse(name)?;
        let path = parsed.destination(parent);
        if path.exists() {
            return Err(ScaffoldError::ProjectExists { path });
        }
        Ok(parsed)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data fetching library choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataFetcher {
    Graphql,
    Json,
    #[default]
    None,
}

impl DataFetcher {
    pub const ALL: [DataFetcher; 3] = [DataFetcher::Graphql, DataFetcher::Json, DataFetcher::None];

    pub fn display_name(&self) -> &'static str {
        match self {
            DataFetcher::Graphql => "GraphQL",
            DataFetcher::Json => "JSON",
            DataFetcher::None => "none",
        }
    }

    /// Parse a CLI value (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "graphql" | "gql" => Some(DataFetcher::Graphql),
            "json" | "rest" => Some(DataFetcher::Json),
            "none" => Some(DataFetcher::None),
            _ => None,
        }
    }
}

impl fmt::Display for DataFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Native mobile platforms requested alongside the web app
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeMobile {
    pub android: bool,
    pub ios: bool,
}

/// The full set of answers for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    name: ProjectName,
    ui_library: bool,
    state_management: bool,
    routing: bool,
    data_fetcher: DataFetcher,
    extra_packages: Vec<String>,
    native_mobile: Option<NativeMobile>,
}

impl AnswerSet {
    pub fn builder(name: ProjectName) -> AnswerSetBuilder {
        AnswerSetBuilder::new(name)
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn ui_library(&self) -> bool {
        self.ui_library
    }

    pub fn state_management(&self) -> bool {
        self.state_management
    }

    pub fn routing(&self) -> bool {
        self.routing
    }

    pub fn data_fetcher(&self) -> DataFetcher {
        self.data_fetcher
    }

    /// Canonical package names, deduplicated, in selection order
    pub fn extra_packages(&self) -> &[String] {
        &self.extra_packages
    }

    pub fn native_mobile(&self) -> Option<NativeMobile> {
        self.native_mobile
    }
}

/// Builder for [`AnswerSet`]. Setter order has no effect on the result.
#[derive(Debug, Clone)]
pub struct AnswerSetBuilder {
    answers: AnswerSet,
}

impl AnswerSetBuilder {
    fn new(name: ProjectName) -> Self {
        Self {
            answers: AnswerSet {
                name,
                ui_library: false,
                state_management: false,
                routing: false,
                data_fetcher: DataFetcher::None,
                extra_packages: Vec::new(),
                native_mobile: None,
            },
        }
    }

    pub fn ui_library(mut self, enabled: bool) -> Self {
        self.answers.ui_library = enabled;
        self
    }

    pub fn state_management(mut self, enabled: bool) -> Self {
        self.answers.state_management = enabled;
        self
    }

    pub fn routing(mut self, enabled: bool) -> Self {
        self.answers.routing = enabled;
        self
    }

    pub fn data_fetcher(mut self, fetcher: DataFetcher) -> Self {
        self.answers.data_fetcher = fetcher;
        self
    }

    pub fn extra_package(mut self, package: impl Into<String>) -> Self {
        let package = package.into();
        if !package.is_empty() && !self.answers.extra_packages.contains(&package) {
            self.answers.extra_packages.push(package);
        }
        self
    }

    pub fn extra_packages<I, S>(self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        packages
            .into_iter()
            .fold(self, |builder, p| builder.extra_package(p))
    }

    pub fn native_mobile(mut self, native: Option<NativeMobile>) -> Self {
        self.answers.native_mobile = native;
        self
    }

    pub fn build(self) -> AnswerSet {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_rejects_empty() {
        assert!(ProjectName::parse("").is_err());
        assert!(ProjectName::parse("   ").is_err());
    }

    #[test]
    fn test_project_name_rejects_paths() {
        assert!(ProjectName::parse("a/b").is_err());
        assert!(ProjectName::parse("a\\b").is_err());
        assert!(ProjectName::parse("..").is_err());
    }

    #[test]
    fn test_project_name_trims() {
        let name = ProjectName::parse("  demo ").unwrap();
        assert_eq!(name.as_str(), "demo");
    }

    #[test]
    fn test_parse_available_detects_collision() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        let err = ProjectName::parse_available("taken", dir.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::ProjectExists { .. }));
        assert!(ProjectName::parse_available("free", dir.path()).is_ok());
    }

    #[test]
    fn test_data_fetcher_parse() {
        assert_eq!(DataFetcher::parse("GraphQL"), Some(DataFetcher::Graphql));
        assert_eq!(DataFetcher::parse("json"), Some(DataFetcher::Json));
        assert_eq!(DataFetcher::parse("none"), Some(DataFetcher::None));
        assert_eq!(DataFetcher::parse("soap"), None);
    }

    #[test]
    fn test_extra_packages_deduplicated() {
        let answers = AnswerSet::builder(ProjectName::parse("demo").unwrap())
            .extra_packages(["polished", "fuse.js", "polished", ""])
            .build();
        assert_eq!(answers.extra_packages(), ["polished", "fuse.js"]);
    }
}
