/* src/main.rs */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use shipwright::config::{ShipwrightConfig, resolve_config};
use shipwright::init::InitOptions;
use shipwright::pack::PackTargets;
use shipwright::paths::{ProjectPaths, ensure_input_exists};
use shipwright::{build, clean, dev, init, lint, pack, patch, ui, upgrade};

#[derive(Parser)]
#[command(name = "shipwright", about = "Build tooling for browser-shell desktop apps")]
struct Cli {
  /// Path to shipwright.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  /// Source directory, relative to the project root
  #[arg(short, long, global = true, default_value = "src")]
  input_dir: String,
  /// Bundler output directory, relative to the project root
  #[arg(short, long, global = true, default_value = "dist")]
  output_dir: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Scaffold a new project from the built-in template
  Init {
    /// Human-readable application name
    #[arg(long)]
    product_name: String,
    /// Project directory name, kebab-case (defaults to the kebab-cased
    /// product name)
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    repository: Option<String>,
  },
  /// Remove build output, packaged artifacts, and run cleanup commands
  Clean,
  /// Lint, clean, assemble injected data, and run the bundlers
  Build,
  /// Package an existing build for distribution
  Pack {
    /// Package for macOS
    #[arg(long)]
    mac: bool,
    /// Package for Windows
    #[arg(long)]
    win: bool,
    /// Upload the packaged artifacts to the release channel
    #[arg(long)]
    publish: bool,
  },
  /// Start the dev server and the bundler watch processes
  Dev,
  /// Run the configured lint commands
  Lint {
    /// Apply automatic fixes
    #[arg(long)]
    fix: bool,
  },
  /// Rewrite the generated code stubs from the current template
  Patch {
    /// Overwrite stubs that already exist
    #[arg(long)]
    force: bool,
  },
  /// Reinstall the CLI through cargo
  Upgrade {
    /// Install a specific version instead of the latest
    #[arg(long)]
    tag: Option<String>,
  },
}

impl Command {
  fn label(&self) -> &'static str {
    match self {
      Command::Init { .. } => "init",
      Command::Clean => "clean",
      Command::Build => "build",
      Command::Pack { .. } => "pack",
      Command::Dev => "dev",
      Command::Lint { .. } => "lint",
      Command::Patch { .. } => "patch",
      Command::Upgrade { .. } => "upgrade",
    }
  }
}

/// Resolve the project config and paths for commands that operate on an
/// existing project.
fn project_context(cli: &Cli) -> Result<(ShipwrightConfig, ProjectPaths)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let (config_path, config) = resolve_config(cli.config.as_deref(), &cwd)?;
  let base_dir = config_path.parent().unwrap_or(&cwd);
  let paths = ProjectPaths::resolve(base_dir, &cli.input_dir, &cli.output_dir);
  Ok((config, paths))
}

async fn run(cli: Cli) -> Result<()> {
  ui::banner(cli.command.label());

  match &cli.command {
    Command::Init { name, product_name, description, author, repository } => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      let opts = InitOptions {
        name: name.clone().unwrap_or_else(|| shipwright::routes::kebab_case(product_name)),
        product_name: product_name.clone(),
        description: description.clone(),
        author: author.clone(),
        repository: repository.clone(),
      };
      init::run_init(&cwd, &opts)?;
    }
    Command::Clean => {
      let (config, paths) = project_context(&cli)?;
      clean::run_clean(&config, &paths)?;
      ui::ok("clean complete");
    }
    Command::Build => {
      let (config, paths) = project_context(&cli)?;
      ensure_input_exists(&paths)?;
      build::run_build(&config, &paths)?;
    }
    Command::Pack { mac, win, publish } => {
      let (config, paths) = project_context(&cli)?;
      let targets = PackTargets { mac: *mac, win: *win, publish: *publish };
      pack::run_pack(&config, &paths, &targets)?;
    }
    Command::Dev => {
      let (config, paths) = project_context(&cli)?;
      ensure_input_exists(&paths)?;
      dev::run_dev(&config, &paths).await?;
    }
    Command::Lint { fix } => {
      let (config, paths) = project_context(&cli)?;
      ensure_input_exists(&paths)?;
      lint::run_lint(&config, &paths, *fix)?;
    }
    Command::Patch { force } => {
      let (config, paths) = project_context(&cli)?;
      patch::run_patch(&config, &paths.base, *force)?;
    }
    Command::Upgrade { tag } => {
      upgrade::run_upgrade(tag.as_deref())?;
    }
  }

  Ok(())
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    )
    .init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let code = match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
      };
      let _ = e.print();
      std::process::exit(code);
    }
  };

  if let Err(e) = run(cli).await {
    ui::fail(&format!("{e:#}"));
    std::process::exit(1);
  }
}
