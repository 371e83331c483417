//! Charm-style CLI prompts using cliclack

use crate::answers::{AnswerSet, DataFetcher, NativeMobile, ProjectName};
use crate::composer::{Feature, EXTRA_PACKAGES};
use crate::product::ProductConfig;
use crate::runtime::{check, PackageManager};
use crate::scaffold::{self, ScaffoldReport};
use crate::templates::{AssetCatalog, TemplateFetcher};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command.
///
/// Every `None` is asked interactively, or defaulted when `yes` is set.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of fetching from remote
    pub template_dir: Option<PathBuf>,

    /// Project name (also the directory created)
    pub name: Option<String>,

    /// Directory the project is created in (defaults to the current directory)
    pub directory: Option<PathBuf>,

    pub ui_library: Option<bool>,
    pub state_management: Option<bool>,
    pub routing: Option<bool>,
    pub data_fetcher: Option<DataFetcher>,

    /// Extra packages to add (canonical package names)
    pub extra_packages: Option<Vec<String>>,

    pub native_mobile: Option<bool>,
    pub android: Option<bool>,
    pub ios: Option<bool>,

    pub package_manager: Option<PackageManager>,

    /// Don't run the package manager after generating
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;
    cliclack::log::remark(config.cli_description())?;

    // Step 1: Setup template fetcher and read the catalog
    let mut fetcher = setup_fetcher(config, &args.template_dir)?;
    let catalog = load_catalog(&fetcher).await?;

    if let Some(warning) = catalog.compatibility_warning(cli_version, config.upgrade_command()) {
        cliclack::log::warning(warning)?;
    }

    // Step 2: Questionnaire
    let parent_dir = resolve_parent_dir(&args)?;
    let answers = ask_questions(&args, &parent_dir)?;
    let package_manager = select_package_manager(config, &args)?;

    // Step 3: Create project
    let report = create_project(&mut fetcher, &catalog, &answers, &parent_dir).await?;
    print_summary(&report)?;

    // Step 4: Install dependencies
    let install_result = install_dependencies(package_manager, &report.destination, &args).await;
    let installed = matches!(install_result, Ok(true));

    // Step 5: Show next steps
    print_next_steps(config, &report.destination, package_manager, installed)?;

    match install_result {
        Ok(_) => {
            cliclack::outro("Happy coding!")?;
            Ok(())
        }
        Err(e) => {
            cliclack::outro_cancel("Project created, but dependencies were not installed")?;
            Err(e)
        }
    }
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone(), config.user_agent())
        }
        None => {
            cliclack::log::info("Using remote templates")?;
            TemplateFetcher::from_config(config)?
        }
    };

    Ok(fetcher)
}

async fn load_catalog(fetcher: &TemplateFetcher) -> Result<AssetCatalog> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    match fetcher.fetch_catalog().await {
        Ok(catalog) => {
            if catalog.description.is_empty() {
                spinner.stop(format!("Templates: {}", catalog.name));
            } else {
                spinner.stop(format!("Templates: {} - {}", catalog.name, catalog.description));
            }
            Ok(catalog)
        }
        Err(e) => {
            spinner.stop("Failed to load templates");
            Err(e).context("Could not read the template catalog")
        }
    }
}

fn resolve_parent_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    Ok(path)
}

/// Use the flag when given, the default under `--yes`, otherwise ask
fn confirm_or_ask(flag: Option<bool>, yes: bool, prompt: &str) -> Result<bool> {
    match flag {
        Some(value) => Ok(value),
        None if yes => Ok(false),
        None => Ok(cliclack::confirm(prompt).initial_value(false).interact()?),
    }
}

fn ask_questions(args: &CreateArgs, parent_dir: &Path) -> Result<AnswerSet> {
    let name = ask_name(args, parent_dir)?;

    let ui_library = confirm_or_ask(
        args.ui_library,
        args.yes,
        &format!("{}?", Feature::UiLibrary.display_name()),
    )?;
    let state_management = confirm_or_ask(
        args.state_management,
        args.yes,
        &format!("{}?", Feature::StateManagement.display_name()),
    )?;
    let routing = confirm_or_ask(
        args.routing,
        args.yes,
        &format!("{}?", Feature::Routing.display_name()),
    )?;
    let data_fetcher = ask_data_fetcher(args)?;
    let extra_packages = ask_extra_packages(args)?;
    let native_mobile = ask_native_mobile(args)?;

    Ok(AnswerSet::builder(name)
        .ui_library(ui_library)
        .state_management(state_management)
        .routing(routing)
        .data_fetcher(data_fetcher)
        .extra_packages(extra_packages)
        .native_mobile(native_mobile)
        .build())
}

fn ask_name(args: &CreateArgs, parent_dir: &Path) -> Result<ProjectName> {
    if let Some(name) = &args.name {
        let name = ProjectName::parse_available(name, parent_dir)?;
        cliclack::log::info(format!("Project: {}", name))?;
        return Ok(name);
    }

    if args.yes {
        anyhow::bail!("A project name is required in non-interactive mode (--name).");
    }

    let parent = parent_dir.to_path_buf();
    let input: String = cliclack::input("What is the project called?")
        .placeholder("my-app")
        .validate(move |input: &String| {
            ProjectName::parse_available(input, &parent)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;

    Ok(ProjectName::parse_available(&input, parent_dir)?)
}

fn ask_data_fetcher(args: &CreateArgs) -> Result<DataFetcher> {
    if let Some(fetcher) = args.data_fetcher {
        return Ok(fetcher);
    }
    if args.yes {
        return Ok(DataFetcher::default());
    }

    let mut select = cliclack::select("Data fetcher?").initial_value(DataFetcher::None);
    for fetcher in DataFetcher::ALL {
        select = select.item(fetcher, fetcher.display_name(), "");
    }
    Ok(select.interact()?)
}

fn ask_extra_packages(args: &CreateArgs) -> Result<Vec<String>> {
    if let Some(packages) = &args.extra_packages {
        return Ok(packages.clone());
    }
    if args.yes {
        return Ok(Vec::new());
    }

    let mut multi = cliclack::multiselect("Install other useful packages? (optional)");
    for (package, description) in EXTRA_PACKAGES {
        multi = multi.item(*package, *package, *description);
    }
    let selected: Vec<&str> = multi.required(false).interact()?;

    Ok(selected.into_iter().map(String::from).collect())
}

fn ask_native_mobile(args: &CreateArgs) -> Result<Option<NativeMobile>> {
    // Asking for a platform implies native mobile
    let platform_flag = args.android.unwrap_or(false) || args.ios.unwrap_or(false);
    let native = match args.native_mobile {
        Some(value) => value,
        None if platform_flag => true,
        None => confirm_or_ask(None, args.yes, &format!("{}?", Feature::NativeMobile.display_name()))?,
    };
    if !native {
        return Ok(None);
    }

    if args.android.is_some() || args.ios.is_some() || args.yes {
        return Ok(Some(NativeMobile {
            android: args.android.unwrap_or(args.yes && args.ios.is_none()),
            ios: args.ios.unwrap_or(args.yes && args.android.is_none()),
        }));
    }

    let platforms: Vec<&str> = cliclack::multiselect("Which platforms?")
        .item("android", "Android", "")
        .item("ios", "iOS", "")
        .initial_values(vec!["android", "ios"])
        .required(false)
        .interact()?;

    Ok(Some(NativeMobile {
        android: platforms.contains(&"android"),
        ios: platforms.contains(&"ios"),
    }))
}

fn select_package_manager<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<PackageManager> {
    if let Some(pm) = args.package_manager {
        return Ok(pm);
    }
    let preferred = config.package_manager();
    if args.yes || args.skip_install {
        return Ok(preferred);
    }

    let mut select = cliclack::select("Package manager").initial_value(preferred);
    for pm in PackageManager::ALL {
        select = select.item(pm, pm.display_name(), "");
    }
    Ok(select.interact()?)
}

async fn create_project(
    fetcher: &mut TemplateFetcher,
    catalog: &AssetCatalog,
    answers: &AnswerSet,
    parent_dir: &Path,
) -> Result<ScaffoldReport> {
    let spinner = cliclack::spinner();
    spinner.start("Writing code...");

    let destination = answers.name().destination(parent_dir);
    let result = scaffold::create_project(fetcher, catalog, answers, parent_dir, &mut |path: &Path| {
        let shown = path.strip_prefix(&destination).unwrap_or(path);
        spinner.set_message(format!("Copying {}", shown.display()));
    })
    .await;

    match result {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files_written,
                report.destination.display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            if destination.exists() {
                cliclack::log::warning(format!(
                    "{} was left partially written",
                    destination.display()
                ))?;
            }
            Err(e.into())
        }
    }
}

fn print_summary(report: &ScaffoldReport) -> Result<()> {
    let composition = &report.composition;

    if !composition.overlays.is_empty() {
        cliclack::log::info(format!(
            "Applied overlays: {}",
            composition.overlays.names().join(", ")
        ))?;
    }

    let mutation = &composition.mutation;
    let added: Vec<String> = mutation
        .dependencies
        .iter()
        .chain(mutation.dev_dependencies.iter())
        .map(|(name, version)| format!("{}@{}", name, version))
        .collect();
    if !added.is_empty() {
        cliclack::log::success(format!("Addons added to package.json: {}", added.join(", ")))?;
    }

    Ok(())
}

/// Returns whether dependencies were installed
async fn install_dependencies(
    package_manager: PackageManager,
    project_dir: &Path,
    args: &CreateArgs,
) -> Result<bool> {
    if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
        return Ok(false);
    }

    let runtimes = check::check_runtimes(package_manager);
    let missing: Vec<String> = runtimes
        .iter()
        .filter(|r| !r.available)
        .map(|r| r.summary())
        .collect();
    if !missing.is_empty() {
        cliclack::log::warning(format!(
            "Skipping dependency installation: {}",
            missing.join(", ")
        ))?;
        return Ok(false);
    }

    let spinner = cliclack::spinner();
    spinner.start(format!("Installing dependencies with {}...", package_manager));

    match package_manager.install(project_dir).await {
        Ok(()) => {
            spinner.stop("Installed dependencies");
            Ok(true)
        }
        Err(e) => {
            spinner.stop("Dependency installation failed");
            cliclack::log::error(e.to_string())?;
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    package_manager: PackageManager,
    installed: bool,
) -> Result<()> {
    let steps = config.next_steps(project_dir, package_manager, installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();

    Ok(())
}
