//! Template asset stores

use crate::error::ScaffoldResult;
use crate::templates::node::TemplateDir;

/// Source of template trees, addressed by store path (e.g. `variations/foundry-wouter`)
#[allow(async_fn_in_trait)]
pub trait TemplateStore {
    /// Tree stored at `asset_path`, or `None` when the store has nothing there
    async fn load(&mut self, asset_path: &str) -> ScaffoldResult<Option<TemplateDir>>;
}

/// Store backed by a tree already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    root: TemplateDir,
}

impl MemoryStore {
    pub fn new(root: TemplateDir) -> Self {
        Self { root }
    }
}

impl TemplateStore for MemoryStore {
    async fn load(&mut self, asset_path: &str) -> ScaffoldResult<Option<TemplateDir>> {
        Ok(self.root.get_dir(asset_path).cloned())
    }
}
