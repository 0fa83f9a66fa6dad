/* src/pack.rs */

// `shipwright pack`: runs the platform packager commands over an existing
// build output. `--publish` is forwarded to the commands via the
// environment so release uploads stay opt-in.

use anyhow::{Result, bail};

use crate::config::ShipwrightConfig;
use crate::paths::ProjectPaths;
use crate::shell::run_command;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackTargets {
  pub mac: bool,
  pub win: bool,
  pub publish: bool,
}

impl PackTargets {
  fn selected(&self) -> Vec<(&'static str, bool)> {
    vec![("mac", self.mac), ("win", self.win)]
  }
}

pub fn run_pack(config: &ShipwrightConfig, paths: &ProjectPaths, targets: &PackTargets) -> Result<()> {
  if !targets.mac && !targets.win {
    bail!("no pack target selected, pass --mac and/or --win");
  }
  if !paths.output.is_dir() {
    bail!("build output {} does not exist, run `shipwright build` first", paths.output.display());
  }

  let publish = if targets.publish { "1" } else { "0" };
  let out_dir = paths.output.display().to_string();
  let env: Vec<(&str, &str)> =
    vec![("SHIPWRIGHT_PUBLISH", publish), ("SHIPWRIGHT_OUTPUT_DIR", &out_dir)];

  for (platform, wanted) in targets.selected() {
    if !wanted {
      continue;
    }
    let commands = match platform {
      "mac" => &config.pack.mac,
      _ => &config.pack.win,
    };
    if commands.is_empty() {
      bail!("no [pack] commands configured for {platform}");
    }
    ui::arrow(&format!("packaging for {platform}"));
    for command in commands {
      run_command(&paths.base, command, "pack", &env)?;
    }
  }

  report_artifacts(&paths.build);
  ui::ok("packaging complete");
  Ok(())
}

/// List packaged artifacts with their sizes, when the packager wrote into
/// the conventional build directory.
fn report_artifacts(build_dir: &std::path::Path) {
  let Ok(entries) = std::fs::read_dir(build_dir) else {
    return;
  };
  for entry in entries.flatten() {
    let path = entry.path();
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
    if name.starts_with('.') || path.is_dir() {
      continue;
    }
    if let Ok(meta) = entry.metadata() {
      ui::detail(&format!("{name}  {}", ui::format_size(meta.len())));
    }
  }
}
