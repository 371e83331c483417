//! create-boilerplate - scaffold a React app from the boilerplate templates

use anyhow::Result;
use boilerplate_core::tui::CreateArgs;
use boilerplate_core::{DataFetcher, PackageManager, ProductConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Boilerplate product configuration
#[derive(Clone)]
pub struct BoilerplateConfig;

impl ProductConfig for BoilerplateConfig {
    fn name(&self) -> &'static str {
        "create-boilerplate"
    }

    fn display_name(&self) -> &'static str {
        "aVileBroker's React boilerplate"
    }

    fn default_template_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/aVileBroker/boilerplate/main/assets"
    }

    fn template_url_env(&self) -> &'static str {
        "BOILERPLATE_TEMPLATE_URL"
    }

    fn cli_description(&self) -> &'static str {
        "Tell me about the app you want to make."
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install boilerplate-cli --force"
    }

    fn next_steps(&self, dir: &Path, package_manager: PackageManager, installed: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        // Step 2: Install dependencies if that didn't happen
        if !installed {
            steps.push(package_manager.install_command());
        }

        // Step 3: Start dev server
        steps.push(package_manager.run_command("start"));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-boilerplate")]
#[command(about = "Tell me about the app you want to make.")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
    /// Build the asset bundle from a template directory (for development use)
    Bundle(BundleArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project name (the directory to create)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory to create the project in (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Use Foundry UI
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub foundry: Option<bool>,

    /// Global state with zustand
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub zustand: Option<bool>,

    /// Page routing with wouter
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub wouter: Option<bool>,

    /// Data fetcher (graphql, json, none)
    #[arg(long, value_parser = parse_data_fetcher)]
    pub data: Option<DataFetcher>,

    /// Other packages to add (comma-separated package names)
    #[arg(short, long, value_delimiter = ',')]
    pub packages: Option<Vec<String>>,

    /// Native mobile app with Capacitor
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub native: Option<bool>,

    /// Add the Android platform (implies --native)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub android: Option<bool>,

    /// Add the iOS platform (implies --native)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub ios: Option<bool>,

    /// Package manager used to install dependencies
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Don't install dependencies after generating the project
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_data_fetcher(s: &str) -> Result<DataFetcher, String> {
    DataFetcher::parse(s).ok_or_else(|| format!("unknown data fetcher '{}' (graphql, json, none)", s))
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            name: args.name,
            directory: args.directory,
            ui_library: args.foundry,
            state_management: args.zustand,
            routing: args.wouter,
            data_fetcher: args.data,
            extra_packages: args.packages,
            native_mobile: args.native,
            android: args.android,
            ios: args.ios,
            package_manager: args.package_manager,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BundleArgs {
    /// Local template directory to bundle (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

/// Initialize tracing on stderr, filtered by RUST_LOG (quiet by default so prompts stay readable)
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();

    let args = Args::parse();
    let config = BoilerplateConfig;

    let result = match args.command {
        Some(Command::Create(create_args)) => {
            boilerplate_core::run(&config, create_args.into(), CLI_VERSION).await
        }
        Some(Command::Bundle(bundle_args)) => {
            boilerplate_core::templates::build_bundle(&config, &bundle_args.template_dir).map(|_| ())
        }
        // No subcommand provided, default to create behavior (interactive mode)
        None => boilerplate_core::run(&config, CreateArgs::default(), CLI_VERSION).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = &result {
        tracing::error!(error = %e, "run failed");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_create_args() {
        let args = Args::parse_from([
            "create-boilerplate",
            "create",
            "--name",
            "demo",
            "--foundry",
            "--wouter=false",
            "--data",
            "json",
            "--packages",
            "polished,fuse.js",
            "--android",
            "--package-manager",
            "npm",
            "--yes",
        ]);
        let Some(Command::Create(cli)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = cli.into();

        assert_eq!(create.name.as_deref(), Some("demo"));
        assert_eq!(create.ui_library, Some(true));
        assert_eq!(create.routing, Some(false));
        assert_eq!(create.state_management, None);
        assert_eq!(create.data_fetcher, Some(DataFetcher::Json));
        assert_eq!(
            create.extra_packages,
            Some(vec!["polished".to_string(), "fuse.js".to_string()])
        );
        assert_eq!(create.android, Some(true));
        assert_eq!(create.package_manager, Some(PackageManager::Npm));
        assert!(create.yes);
    }

    #[test]
    fn test_unknown_data_fetcher_is_rejected() {
        let result = Args::try_parse_from(["create-boilerplate", "create", "--data", "soap"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_next_steps_without_install() {
        let dir = std::env::temp_dir().join("boilerplate-next-steps");
        let steps = BoilerplateConfig.next_steps(&dir, PackageManager::Yarn, false);
        assert_eq!(steps.last().map(String::as_str), Some("yarn start"));
        assert!(steps.contains(&"yarn install".to_string()));
        assert!(steps[0].starts_with("cd "));
    }

    #[test]
    fn test_next_steps_after_install() {
        let dir = std::env::temp_dir().join("boilerplate-next-steps");
        let steps = BoilerplateConfig.next_steps(&dir, PackageManager::Npm, true);
        assert!(!steps.iter().any(|s| s.contains("install")));
        assert_eq!(steps.last().map(String::as_str), Some("npm run start"));
    }
}
