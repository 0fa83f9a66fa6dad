/* src/dev/process.rs */

use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::ui::{CYAN, DIM, MAGENTA, RESET};

pub(super) struct ChildProcess {
  pub label: &'static str,
  pub child: tokio::process::Child,
}

pub(super) fn spawn_child(
  label: &'static str,
  command: &str,
  base_dir: &Path,
  env_vars: &[(&str, &str)],
) -> Result<ChildProcess> {
  let mut cmd = Command::new("sh");
  cmd.args(["-c", command]);
  cmd.current_dir(base_dir);
  cmd.stdout(std::process::Stdio::piped());
  cmd.stderr(std::process::Stdio::piped());
  cmd.kill_on_drop(true);

  for (key, val) in env_vars {
    cmd.env(key, val);
  }

  let child = cmd.spawn()?;
  Ok(ChildProcess { label, child })
}

pub(super) fn label_color(label: &str) -> &'static str {
  match label {
    "host" => CYAN,
    "ui" => MAGENTA,
    _ => DIM,
  }
}

/// Pipe stdout/stderr, prefixed with a colored label
pub(super) async fn pipe_output(proc: &mut ChildProcess) {
  let label = proc.label;
  let color = label_color(label);
  let stdout = proc.child.stdout.take();
  let stderr = proc.child.stderr.take();

  if let Some(stdout) = stdout {
    let reader = BufReader::new(stdout);
    let c = color;
    tokio::spawn(async move {
      let mut lines = reader.lines();
      while let Ok(Some(line)) = lines.next_line().await {
        println!("  {c}{DIM}{label:>4}{RESET} {line}");
      }
    });
  }

  if let Some(stderr) = stderr {
    let reader = BufReader::new(stderr);
    let c = color;
    tokio::spawn(async move {
      let mut lines = reader.lines();
      while let Ok(Some(line)) = lines.next_line().await {
        eprintln!("  {c}{DIM}{label:>4}{RESET} {line}");
      }
    });
  }
}

/// Check whether any child has exited, returning its label and exit status.
pub(super) fn try_reap(
  children: &mut [ChildProcess],
) -> Option<(&'static str, Result<std::process::ExitStatus, std::io::Error>)> {
  for child in children.iter_mut() {
    match child.child.try_wait() {
      Ok(Some(status)) => return Some((child.label, Ok(status))),
      Ok(None) => {}
      Err(e) => return Some((child.label, Err(e))),
    }
  }
  None
}
