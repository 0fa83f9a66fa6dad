/* src/build/mod.rs */

// `shipwright build`: lint gate, clean, injected-data assembly, and the
// bundler commands for the two runtime processes.

pub mod inject;

use anyhow::Result;

use crate::config::ShipwrightConfig;
use crate::paths::ProjectPaths;
use crate::shell::run_command;
use crate::ui;
use crate::{clean, lint};

pub fn run_build(config: &ShipwrightConfig, paths: &ProjectPaths) -> Result<()> {
  let total = 4;

  ui::step(1, total, "linting");
  if config.build.linter && !config.lint.commands.is_empty() {
    lint::run_lint(config, paths, false)?;
  } else {
    ui::detail("linter disabled, skipping");
  }

  ui::step(2, total, "cleaning previous output");
  clean::run_clean(config, paths)?;

  ui::step(3, total, "assembling injected data");
  let data = inject::assemble(config, paths, false)?;
  let manifest = inject::write(&data, &paths.output)?;
  let data_file = paths.output.join("shipwright").join("build-data.json");
  if let Ok(meta) = std::fs::metadata(&data_file) {
    ui::detail_ok(&format!("build-data.json  {}", ui::format_size(meta.len())));
  }
  ui::detail_ok(&format!("{} routes", manifest.routes));
  ui::detail_ok(&format!(
    "{} locales ({})",
    manifest.locales.len(),
    if manifest.locales.is_empty() { "none".to_string() } else { manifest.locales.join(", ") }
  ));

  ui::step(4, total, "bundling");
  let sourcemap = if config.build.sourcemap { "1" } else { "0" };
  let out_dir = paths.output.display().to_string();
  let env: Vec<(&str, &str)> = vec![
    ("NODE_ENV", "production"),
    ("SHIPWRIGHT_SOURCEMAP", sourcemap),
    ("SHIPWRIGHT_OUTPUT_DIR", &out_dir),
  ];

  if let Some(ref command) = config.build.ui_command {
    run_command(&paths.base, command, "ui bundler", &env)?;
  }
  if let Some(ref command) = config.build.host_command {
    run_command(&paths.base, command, "host bundler", &env)?;
  }
  if config.build.ui_command.is_none() && config.build.host_command.is_none() {
    ui::detail("no bundler commands configured");
  }

  ui::blank();
  ui::ok("build complete");
  Ok(())
}
