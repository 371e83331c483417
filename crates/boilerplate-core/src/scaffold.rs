//! Project creation: base template, overlays, manifest
//!
//! A run is fail-fast. Once the destination directory exists, an error
//! leaves the partially written project in place so the user can inspect it;
//! the error message names the path that failed.

use crate::answers::AnswerSet;
use crate::composer::{compose, Composition};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::templates::{replicate_with_progress, AssetCatalog, PackageManifest, TemplateStore, MANIFEST_FILE};
use std::path::{Path, PathBuf};

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub destination: PathBuf,
    pub files_written: usize,
    pub composition: Composition,
}

/// Create the project described by `answers` under `parent_dir`.
///
/// `progress` is called with every path before it is written.
pub async fn create_project<S, F>(
    store: &mut S,
    catalog: &AssetCatalog,
    answers: &AnswerSet,
    parent_dir: &Path,
    progress: &mut F,
) -> ScaffoldResult<ScaffoldReport>
where
    S: TemplateStore,
    F: FnMut(&Path),
{
    let destination = answers.name().destination(parent_dir);
    if destination.exists() {
        return Err(ScaffoldError::ProjectExists { path: destination });
    }

    let base_path = catalog.base_asset_path();
    let base = store
        .load(&base_path)
        .await?
        .ok_or(ScaffoldError::MissingTemplate {
            asset_path: base_path,
        })?;

    std::fs::create_dir(&destination)
        .map_err(|e| ScaffoldError::write_failed(&destination, e))?;
    tracing::info!(path = %destination.display(), "created project directory");

    let exclusions = catalog.exclusions();
    let mut files_written = replicate_with_progress(&base, &destination, &exclusions, progress)?;

    let mut manifest = PackageManifest::load(&destination.join(MANIFEST_FILE))?;
    let composition = compose(answers, &catalog.version_table());

    for overlay in &composition.overlays {
        let asset_path = overlay.asset_path();
        let tree = store
            .load(&asset_path)
            .await?
            .ok_or_else(|| ScaffoldError::UnknownOverlay {
                overlay: overlay.name().to_string(),
                asset_path: asset_path.clone(),
            })?;

        let target = destination.join(overlay.target());
        let written = replicate_with_progress(&tree, &target, &exclusions, progress)?;
        tracing::debug!(overlay = %overlay, files = written, "applied overlay");
        files_written += written;
    }

    manifest.apply(&composition.mutation)?;
    manifest.save()?;

    Ok(ScaffoldReport {
        destination,
        files_written,
        composition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{DataFetcher, NativeMobile, ProjectName};
    use crate::templates::{MemoryStore, TemplateDir, TemplateFetcher};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn catalog() -> AssetCatalog {
        AssetCatalog::parse("name: Test\nversion: 0.1.0\n").unwrap()
    }

    fn assets() -> TemplateDir {
        let mut root = TemplateDir::new();
        root.insert_file(
            "templates/base/package.json",
            r#"{"name":"base","dependencies":{"react":"17"},"scripts":{"start":"react-scripts start"}}"#,
        );
        root.insert_file("templates/base/src/App.tsx", "base app");
        root.insert_file("templates/base/src/index.tsx", "index");
        root.insert_file("templates/base/.template.json", "{}");
        root.insert_file("templates/base/node_modules/react/index.js", "");
        root.insert_file("addonModules/zustand/state/appState.ts", "store");
        root.insert_file("addonModules/wouter/pages/Home.tsx", "home");
        root.insert_file("addonModules/capacitor/capacitor.config.json", "{}");
        root.insert_file("variations/foundry/App.tsx", "foundry app");
        root.insert_file("variations/wouter/App.tsx", "wouter app");
        root.insert_file("variations/foundry-wouter/App.tsx", "foundry wouter app");
        root
    }

    fn answers(name: &str) -> crate::answers::AnswerSetBuilder {
        AnswerSet::builder(ProjectName::parse(name).unwrap())
    }

    async fn run(answers: &AnswerSet, parent: &Path) -> ScaffoldResult<ScaffoldReport> {
        let mut store = MemoryStore::new(assets());
        create_project(&mut store, &catalog(), answers, parent, &mut |_: &Path| {}).await
    }

    #[tokio::test]
    async fn test_base_only_project() {
        let parent = tempdir().unwrap();
        let report = run(&answers("demo").build(), parent.path()).await.unwrap();

        let dest = parent.path().join("demo");
        assert_eq!(report.destination, dest);
        assert_eq!(report.files_written, 3);
        assert!(report.composition.overlays.is_empty());
        assert_eq!(fs::read_to_string(dest.join("src/App.tsx")).unwrap(), "base app");
        assert!(!dest.join(".template.json").exists());
        assert!(!dest.join("node_modules").exists());

        let manifest = PackageManifest::load(&dest.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.entry("dependencies", "react"), Some("17"));
    }

    #[tokio::test]
    async fn test_full_project_layers_overlays() {
        let parent = tempdir().unwrap();
        let answers = answers("demo")
            .ui_library(true)
            .state_management(true)
            .routing(true)
            .data_fetcher(DataFetcher::Json)
            .extra_packages(["fuse.js"])
            .native_mobile(Some(NativeMobile {
                android: true,
                ios: false,
            }))
            .build();

        let report = run(&answers, parent.path()).await.unwrap();
        let dest = parent.path().join("demo");

        assert_eq!(
            report.composition.overlays.names(),
            ["zustand", "wouter", "capacitor", "foundry-wouter"]
        );
        assert_eq!(
            fs::read_to_string(dest.join("src/App.tsx")).unwrap(),
            "foundry wouter app"
        );
        assert_eq!(fs::read_to_string(dest.join("src/index.tsx")).unwrap(), "index");
        assert!(dest.join("src/state/appState.ts").exists());
        assert!(dest.join("src/pages/Home.tsx").exists());
        assert!(dest.join("capacitor.config.json").exists());

        let manifest = PackageManifest::load(&dest.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.entry("dependencies", "react"), Some("17"));
        assert_eq!(manifest.entry("dependencies", "@headstorm/foundry-react-ui"), Some("1"));
        assert_eq!(manifest.entry("dependencies", "zustand"), Some("3"));
        assert_eq!(manifest.entry("dependencies", "react-query"), Some("3"));
        assert_eq!(manifest.entry("dependencies", "fuse.js"), Some("*"));
        assert_eq!(manifest.entry("devDependencies", "@types/wouter"), Some("2"));
        assert_eq!(manifest.entry("scripts", "start"), Some("react-scripts start"));
        assert_eq!(manifest.entry("scripts", "android"), Some("cap run android"));
        assert_eq!(manifest.entry("scripts", "ios"), None);
    }

    #[tokio::test]
    async fn test_existing_destination_is_rejected_untouched() {
        let parent = tempdir().unwrap();
        let dest = parent.path().join("demo");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("keep.txt"), "mine").unwrap();

        let err = run(&answers("demo").build(), parent.path()).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::ProjectExists { .. }));
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_overlay_keeps_base_and_skips_manifest_write() {
        let parent = tempdir().unwrap();
        let full = assets();
        let mut base_only = TemplateDir::new();
        for path in ["templates/base/package.json", "templates/base/src/App.tsx"] {
            base_only.insert_file(path, full.get_file(path).unwrap().to_vec());
        }
        let mut store = MemoryStore::new(base_only);
        let answers = answers("demo").routing(true).build();

        let err = create_project(&mut store, &catalog(), &answers, parent.path(), &mut |_: &Path| {})
            .await
            .unwrap_err();

        match err {
            ScaffoldError::UnknownOverlay { overlay, asset_path } => {
                assert_eq!(overlay, "wouter");
                assert_eq!(asset_path, "addonModules/wouter");
            }
            other => panic!("unexpected error: {other}"),
        }
        let dest = parent.path().join("demo");
        assert_eq!(fs::read_to_string(dest.join("src/App.tsx")).unwrap(), "base app");
        let manifest = PackageManifest::load(&dest.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.entry("dependencies", "wouter"), None);
    }

    #[tokio::test]
    async fn test_missing_base_creates_nothing() {
        let parent = tempdir().unwrap();
        let mut store = MemoryStore::new(TemplateDir::new());

        let err = create_project(
            &mut store,
            &catalog(),
            &answers("demo").build(),
            parent.path(),
            &mut |_: &Path| {},
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ScaffoldError::MissingTemplate { .. }));
        assert!(!parent.path().join("demo").exists());
    }

    #[tokio::test]
    async fn test_progress_sees_every_written_path() {
        let parent = tempdir().unwrap();
        let mut store = MemoryStore::new(assets());
        let answers = answers("demo").state_management(true).build();
        let mut seen = Vec::new();

        let report = create_project(&mut store, &catalog(), &answers, parent.path(), &mut |p: &Path| {
            seen.push(p.to_path_buf())
        })
        .await
        .unwrap();

        let dest = parent.path().join("demo");
        assert!(seen.contains(&dest.join("package.json")));
        assert!(seen.contains(&dest.join("src/state/appState.ts")));
        assert_eq!(report.files_written, 4);
    }

    fn shipped_assets() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
    }

    #[tokio::test]
    async fn test_shipped_assets_cover_every_overlay() {
        let mut fetcher = TemplateFetcher::from_local(shipped_assets(), "test");
        let catalog = fetcher.fetch_catalog().await.unwrap();
        assert!(fetcher.load(&catalog.base_asset_path()).await.unwrap().is_some());

        for bits in 0u8..16 {
            let answers = answers("demo")
                .ui_library(bits & 1 != 0)
                .state_management(bits & 2 != 0)
                .routing(bits & 4 != 0)
                .native_mobile((bits & 8 != 0).then(NativeMobile::default))
                .build();
            let composition = compose(&answers, &catalog.version_table());
            for overlay in &composition.overlays {
                assert!(
                    fetcher.load(&overlay.asset_path()).await.unwrap().is_some(),
                    "missing asset for {}",
                    overlay.asset_path()
                );
            }
        }
    }

    #[tokio::test]
    async fn test_end_to_end_with_shipped_assets() {
        let parent = tempdir().unwrap();
        let mut fetcher = TemplateFetcher::from_local(shipped_assets(), "test");
        let catalog = fetcher.fetch_catalog().await.unwrap();
        let answers = answers("demo").ui_library(true).routing(true).build();

        let report = create_project(&mut fetcher, &catalog, &answers, parent.path(), &mut |_: &Path| {})
            .await
            .unwrap();

        assert_eq!(report.composition.overlays.names(), ["wouter", "foundry-wouter"]);
        let dest = parent.path().join("demo");
        assert!(!dest.join(".template.json").exists());
        assert!(dest.join("src/pages/Login.tsx").exists());
        let app = fs::read_to_string(dest.join("src/App.tsx")).unwrap();
        assert!(app.contains("FoundryProvider") && app.contains("wouter"));

        let manifest = PackageManifest::load(&dest.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.entry("dependencies", "react"), Some("^17.0.2"));
        assert_eq!(manifest.entry("dependencies", "wouter"), Some("2"));
        assert_eq!(manifest.entry("devDependencies", "@types/wouter"), Some("2"));
    }
}
