//! In-memory template trees

use std::collections::{BTreeMap, BTreeSet};

/// Names that are never copied out of the asset store
pub const DEFAULT_EXCLUSIONS: &[&str] = &["node_modules", ".template.json"];

/// A file or directory inside a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    File(Vec<u8>),
    Directory(TemplateDir),
}

impl TemplateNode {
    /// Turn this node into a directory (discarding file contents) and return it
    fn make_dir(&mut self) -> &mut TemplateDir {
        if let TemplateNode::File(_) = self {
            *self = TemplateNode::Directory(TemplateDir::default());
        }
        match self {
            TemplateNode::Directory(dir) => dir,
            TemplateNode::File(_) => unreachable!("node was converted to a directory"),
        }
    }
}

/// A directory node: named children, enumerated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDir {
    children: BTreeMap<String, TemplateNode>,
}

impl TemplateDir {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &TemplateNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up a nested directory by `/`-separated path ("" is this directory)
    pub fn get_dir(&self, path: &str) -> Option<&TemplateDir> {
        split_path(path).try_fold(self, |dir, part| match dir.children.get(part) {
            Some(TemplateNode::Directory(child)) => Some(child),
            _ => None,
        })
    }

    /// Look up a file's contents by `/`-separated path
    pub fn get_file(&self, path: &str) -> Option<&[u8]> {
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        match self.get_dir(parent)?.children.get(name)? {
            TemplateNode::File(contents) => Some(contents.as_slice()),
            TemplateNode::Directory(_) => None,
        }
    }

    /// Insert a file, creating intermediate directories
    pub fn insert_file(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        let mut parts: Vec<&str> = split_path(path).collect();
        let Some(name) = parts.pop() else {
            return;
        };
        self.dir_mut(&parts)
            .children
            .insert(name.to_string(), TemplateNode::File(contents.into()));
    }

    /// Insert an (possibly empty) directory, creating intermediate directories
    pub fn insert_dir(&mut self, path: &str) {
        let parts: Vec<&str> = split_path(path).collect();
        self.dir_mut(&parts);
    }

    /// Number of files in this tree
    pub fn file_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TemplateNode::File(_) => 1,
                TemplateNode::Directory(dir) => dir.file_count(),
            })
            .sum()
    }

    fn dir_mut(&mut self, parts: &[&str]) -> &mut TemplateDir {
        let mut current = self;
        for part in parts {
            current = current
                .children
                .entry(part.to_string())
                .or_insert_with(|| TemplateNode::Directory(TemplateDir::default()))
                .make_dir();
        }
        current
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|part| !part.is_empty() && *part != ".")
}

/// File and directory names skipped during replication and bundling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<String>);

impl Default for ExclusionSet {
    fn default() -> Self {
        Self(DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl ExclusionSet {
    /// Only the given names (no defaults)
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// This set plus the given names
    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}
