/* src/lint.rs */

// `shipwright lint`: runs the configured lint commands against the input
// directory, optionally applying fixes. A failing command is fatal.

use anyhow::Result;

use crate::config::ShipwrightConfig;
use crate::paths::ProjectPaths;
use crate::shell::run_command;
use crate::ui;

pub fn run_lint(config: &ShipwrightConfig, paths: &ProjectPaths, fix: bool) -> Result<()> {
  if config.lint.commands.is_empty() {
    ui::warn("no lint commands configured in shipwright.toml");
    return Ok(());
  }

  let input = paths.input.display().to_string();
  ui::arrow(&if fix { format!("linting and fixing {input}") } else { format!("linting {input}") });

  for command in &config.lint.commands {
    let command = match (fix, &config.lint.fix_flag) {
      (true, Some(flag)) => format!("{command} {flag}"),
      _ => command.clone(),
    };
    run_command(&paths.base, &command, "lint", &[("SHIPWRIGHT_INPUT_DIR", &input)])?;
  }

  ui::ok("linter completed successfully");
  Ok(())
}
