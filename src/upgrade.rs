/* src/upgrade.rs */

// `shipwright upgrade`: reinstalls the CLI through cargo, optionally at a
// pinned version. Runs with inherited stdio so cargo's own progress output
// stays visible.

use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::shell::which_exists;
use crate::ui;

pub fn run_upgrade(tag: Option<&str>) -> Result<()> {
  if !which_exists("cargo") {
    bail!("cargo not found on PATH, install Rust from https://rustup.rs first");
  }

  match tag {
    Some(tag) => ui::arrow(&format!("installing shipwright {tag}")),
    None => ui::arrow("installing the latest shipwright release"),
  }

  let mut cmd = Command::new("cargo");
  cmd.args(["install", "shipwright", "--force"]);
  if let Some(tag) = tag {
    cmd.args(["--version", tag]);
  }

  let status = cmd.status().context("failed to run cargo install")?;
  if !status.success() {
    bail!("cargo install exited with status {status}");
  }

  ui::ok("shipwright upgraded");
  Ok(())
}
