//! Template fetching from a remote URL or a local asset directory
//!
//! Both sources go through the same zip bundle:
//! - Remote: downloads the pre-built `assets.zip` next to `template.yaml`
//! - Local: builds the bundle in memory from the directory, then reads it back
//!
//! This keeps development and production behavior identical.

use super::catalog::{AssetCatalog, BUNDLE_FILE, CATALOG_FILE};
use super::node::{ExclusionSet, TemplateDir};
use super::store::TemplateStore;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::product::ProductConfig;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> ScaffoldResult<Self> {
        let url_str = std::env::var(config.template_url_env())
            .unwrap_or_else(|_| config.default_template_url().to_string());
        let url = Url::parse(&url_str).map_err(|e| ScaffoldError::Fetch {
            url: url_str.clone(),
            message: format!("invalid template URL: {}", e),
        })?;
        Ok(Self::Remote(url))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Template fetcher - handles retrieving the asset store from remote or local sources
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    /// Extracted bundle, loaded on first use
    bundle: Option<TemplateDir>,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            bundle: None,
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> ScaffoldResult<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> ScaffoldResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ScaffoldError::Fetch {
                url: base.to_string(),
                message: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    async fn fetch_remote(&self, url: Url) -> ScaffoldResult<Vec<u8>> {
        let fetch_error = |message: String| ScaffoldError::Fetch {
            url: url.to_string(),
            message,
        };

        tracing::debug!(%url, "fetching");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Fetch the root catalog
    pub async fn fetch_catalog(&self) -> ScaffoldResult<AssetCatalog> {
        match &self.source {
            TemplateSource::Remote(base_url) => {
                let url = Self::build_url(base_url, CATALOG_FILE)?;
                let bytes = self.fetch_remote(url).await?;
                AssetCatalog::parse(&String::from_utf8_lossy(&bytes))
            }
            TemplateSource::Local(path) => read_local_catalog(path),
        }
    }

    /// Build the asset bundle for a local asset directory.
    ///
    /// Entries are added in name order; excluded names are skipped at every
    /// depth, as are the catalog and any previously built bundle at the root.
    pub fn build_local_bundle(asset_dir: &Path, exclusions: &ExclusionSet) -> ScaffoldResult<Vec<u8>> {
        let mut zip_buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            let walker = WalkDir::new(asset_dir)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    let name = entry.file_name().to_string_lossy();
                    if exclusions.contains(&name) {
                        return false;
                    }
                    !(entry.depth() == 1 && (name == CATALOG_FILE || name == BUNDLE_FILE))
                });

            for entry in walker {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(asset_dir).to_path_buf();
                    ScaffoldError::read_failed(path, e.into())
                })?;
                let relative = entry
                    .path()
                    .strip_prefix(asset_dir)
                    .unwrap_or(entry.path())
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");

                let file_type = entry.file_type();
                if file_type.is_dir() {
                    zip.add_directory(format!("{}/", relative), options)?;
                } else if file_type.is_file() {
                    let content = std::fs::read(entry.path())
                        .map_err(|e| ScaffoldError::read_failed(entry.path(), e))?;
                    zip.start_file(relative, options)?;
                    zip.write_all(&content).map_err(ZipError::from)?;
                } else {
                    tracing::warn!(path = %entry.path().display(), "skipping non-regular file");
                }
            }

            zip.finish()?;
        }

        Ok(zip_buffer)
    }

    /// Extract a bundle into an in-memory tree
    pub fn extract_bundle(zip_bytes: &[u8]) -> ScaffoldResult<TemplateDir> {
        let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;
        let mut root = TemplateDir::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;

            // Reject absolute paths and `..` components
            if file.enclosed_name().is_none() {
                tracing::warn!(name = file.name(), "skipping unsafe bundle entry");
                continue;
            }
            let name = file.name().to_string();

            if file.is_dir() {
                root.insert_dir(&name);
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents).map_err(ZipError::from)?;
            root.insert_file(&name, contents);
        }

        Ok(root)
    }

    /// Fetch/build and cache the bundle
    async fn ensure_bundle(&mut self) -> ScaffoldResult<&TemplateDir> {
        if self.bundle.is_none() {
            let zip_bytes = match &self.source {
                TemplateSource::Remote(base_url) => {
                    let url = Self::build_url(base_url, BUNDLE_FILE)?;
                    self.fetch_remote(url).await?
                }
                TemplateSource::Local(path) => {
                    let catalog = read_local_catalog(path)?;
                    Self::build_local_bundle(path, &catalog.exclusions())?
                }
            };
            let tree = Self::extract_bundle(&zip_bytes)?;
            tracing::debug!(files = tree.file_count(), "asset bundle loaded");
            self.bundle = Some(tree);
        }

        Ok(self.bundle.get_or_insert_with(TemplateDir::new))
    }
}

impl TemplateStore for TemplateFetcher {
    async fn load(&mut self, asset_path: &str) -> ScaffoldResult<Option<TemplateDir>> {
        let bundle = self.ensure_bundle().await?;
        Ok(bundle.get_dir(asset_path).cloned())
    }
}

fn read_local_catalog(path: &Path) -> ScaffoldResult<AssetCatalog> {
    let catalog_path = path.join(CATALOG_FILE);
    let content = std::fs::read_to_string(&catalog_path)
        .map_err(|e| ScaffoldError::read_failed(&catalog_path, e))?;
    AssetCatalog::parse(&content)
}
