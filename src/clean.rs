/* src/clean.rs */

// `shipwright clean`: removes the bundler output and packaged artifacts,
// then runs user-defined cleanup commands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ShipwrightConfig;
use crate::paths::ProjectPaths;
use crate::shell::run_command;
use crate::ui;

pub fn run_clean(config: &ShipwrightConfig, paths: &ProjectPaths) -> Result<()> {
  delete_dir_if_exists(&paths.output)?;
  delete_dir_if_exists(&paths.build)?;

  if let Some(ref out_dir) = config.build.out_dir {
    delete_dir_if_exists(&paths.base.join(out_dir))?;
  }

  for command in &config.clean.commands {
    run_command(&paths.base, command, "clean", &[])?;
  }

  Ok(())
}

fn delete_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path).with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delete_dir_if_exists_noop_on_missing() {
    let path = std::env::temp_dir().join("shipwright-test-clean-nonexistent");
    let _ = std::fs::remove_dir_all(&path);
    assert!(delete_dir_if_exists(&path).is_ok());
  }

  #[test]
  fn run_clean_deletes_output_and_build_dirs() {
    let tmp = std::env::temp_dir().join("shipwright-test-run-clean");
    let _ = std::fs::remove_dir_all(&tmp);

    let paths = ProjectPaths::resolve(&tmp, "src", "dist");
    std::fs::create_dir_all(&paths.output).unwrap();
    std::fs::create_dir_all(&paths.build).unwrap();
    std::fs::write(paths.output.join("bundle.js"), "//").unwrap();

    let config = ShipwrightConfig::default_for("test");
    run_clean(&config, &paths).unwrap();

    assert!(!paths.output.exists());
    assert!(!paths.build.exists());

    let _ = std::fs::remove_dir_all(&tmp);
  }

  #[test]
  fn run_clean_deletes_configured_out_dir() {
    let tmp = std::env::temp_dir().join("shipwright-test-clean-outdir");
    let _ = std::fs::remove_dir_all(&tmp);

    let paths = ProjectPaths::resolve(&tmp, "src", "dist");
    let extra = tmp.join(".cache/output");
    std::fs::create_dir_all(&extra).unwrap();

    let mut config = ShipwrightConfig::default_for("test");
    config.build.out_dir = Some(".cache/output".to_string());
    run_clean(&config, &paths).unwrap();

    assert!(!extra.exists());

    let _ = std::fs::remove_dir_all(&tmp);
  }
}
