/* src/patch.rs */

// `shipwright patch`: rewrites the generated code stubs in an existing
// project from the current template. Useful after an upgrade changes the
// glue between the tool and the generated app. Only touches files that
// are missing unless `--force` is passed.

use std::path::Path;

use anyhow::Result;

use crate::config::ShipwrightConfig;
use crate::init::{self, InitOptions};
use crate::ui;

pub fn run_patch(config: &ShipwrightConfig, base_dir: &Path, force: bool) -> Result<()> {
  let opts = InitOptions {
    name: config.project.name.clone(),
    product_name: config.project.name.clone(),
    description: None,
    author: None,
    repository: None,
  };

  let mut written = 0usize;
  let mut skipped = 0usize;
  for rel in init::stub_files() {
    let dest = base_dir.join(&rel);
    if dest.exists() && !force {
      skipped += 1;
      continue;
    }
    init::write_stub(base_dir, &rel, &opts)?;
    ui::detail(&rel);
    written += 1;
  }

  if skipped > 0 {
    ui::warn(&format!("{skipped} existing files left alone, pass --force to overwrite"));
  }
  ui::ok(&format!("{written} stub files written"));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn patch_writes_missing_stubs_only() {
    let tmp = std::env::temp_dir().join("shipwright-test-patch");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("src/host")).unwrap();
    std::fs::write(tmp.join("src/host/index.js"), "// custom").unwrap();

    let config = ShipwrightConfig::default_for("my-app");
    run_patch(&config, &tmp, false).unwrap();

    // The edited stub survives, the missing ones appear.
    let host = std::fs::read_to_string(tmp.join("src/host/index.js")).unwrap();
    assert_eq!(host, "// custom");
    assert!(tmp.join("src/ui/pages/index.js").is_file());

    let _ = std::fs::remove_dir_all(&tmp);
  }

  #[test]
  fn patch_force_overwrites() {
    let tmp = std::env::temp_dir().join("shipwright-test-patch-force");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("src/host")).unwrap();
    std::fs::write(tmp.join("src/host/index.js"), "// custom").unwrap();

    let config = ShipwrightConfig::default_for("my-app");
    run_patch(&config, &tmp, true).unwrap();

    let host = std::fs::read_to_string(tmp.join("src/host/index.js")).unwrap();
    assert_ne!(host, "// custom");

    let _ = std::fs::remove_dir_all(&tmp);
  }
}
