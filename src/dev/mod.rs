/* src/dev/mod.rs */

// `shipwright dev`: asset server plus the two bundler watch processes.
// Page and locale edits regenerate the injected data; host source edits
// restart the host process when dev.reload_host is on.

mod process;
mod server;
mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;

use crate::build::inject;
use crate::config::ShipwrightConfig;
use crate::paths::ProjectPaths;
use crate::ui::{self, CYAN, DIM, GREEN, RED, RESET};

use process::{ChildProcess, label_color, pipe_output, spawn_child, try_reap};
use server::DevState;
use watch::{setup_watcher, watch_dir};

pub async fn run_dev(config: &ShipwrightConfig, paths: &ProjectPaths) -> Result<()> {
  // Initial injected data so the host bundle has something to load.
  let data = inject::assemble(config, paths, true)?;
  inject::write(&data, &paths.output)?;

  let (mut _watcher, mut watcher_rx) = setup_watcher()?;
  let mut watched_dirs = Vec::new();
  let input_rel = paths
    .input
    .strip_prefix(&paths.base)
    .map(|p| p.to_string_lossy().to_string())
    .unwrap_or_else(|_| paths.input.to_string_lossy().to_string());
  watch_dir(&mut _watcher, &paths.base, &input_rel, &mut watched_dirs)?;
  let messages_rel = config
    .i18n
    .as_ref()
    .map(|i18n| i18n.messages_dir.clone())
    .unwrap_or_else(|| "config/locales".to_string());
  watch_dir(&mut _watcher, &paths.base, &messages_rel, &mut watched_dirs)?;

  let port = server::find_available_port(config.dev.port)?;
  let port_str = port.to_string();
  let sourcemap = if config.dev.sourcemap { "1" } else { "0" };
  let out_dir = paths.output.display().to_string();
  let env: Vec<(&str, &str)> = vec![
    ("NODE_ENV", "development"),
    ("SHIPWRIGHT_DEV_PORT", &port_str),
    ("SHIPWRIGHT_SOURCEMAP", sourcemap),
    ("SHIPWRIGHT_OUTPUT_DIR", &out_dir),
  ];

  print_dev_banner(config, port, &watched_dirs);

  let state = Arc::new(DevState { config: config.clone(), paths: paths.clone() });
  let mut server = tokio::spawn(server::serve(state, port));

  let mut children: Vec<ChildProcess> = Vec::new();
  if let Some(cmd) = config.dev.ui_command.as_deref() {
    let mut proc = spawn_child("ui", cmd, &paths.base, &env)?;
    pipe_output(&mut proc).await;
    children.push(proc);
  }
  if let Some(cmd) = config.dev.host_command.as_deref() {
    let mut proc = spawn_child("host", cmd, &paths.base, &env)?;
    pipe_output(&mut proc).await;
    children.push(proc);
  }

  let mut reap_tick = tokio::time::interval(Duration::from_millis(200));
  reap_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

  // Event loop: Ctrl+C, server or child exit, or file change
  loop {
    tokio::select! {
      _ = signal::ctrl_c() => {
        println!();
        println!("  {DIM}shutting down...{RESET}");
        break;
      }
      result = &mut server => {
        match result {
          Ok(Ok(())) => println!("  {RED}dev server stopped{RESET}"),
          Ok(Err(e)) => println!("  {RED}dev server error: {e}{RESET}"),
          Err(e) => println!("  {RED}dev server panicked: {e}{RESET}"),
        }
        return Ok(());
      }
      _ = reap_tick.tick() => {
        if let Some((label, status)) = try_reap(&mut children) {
          let color = label_color(label);
          match status {
            Ok(s) if s.success() => println!("  {color}{label}{RESET} exited"),
            Ok(s) => println!("  {RED}{label} exited with {s}{RESET}"),
            Err(e) => println!("  {RED}{label} error: {e}{RESET}"),
          }
          break;
        }
      }
      Some(()) = watcher_rx.recv() => {
        // Debounce: wait 300ms, drain pending events
        tokio::time::sleep(Duration::from_millis(300)).await;
        while watcher_rx.try_recv().is_ok() {}
        handle_change(config, paths, &env, &mut children).await;
      }
    }
  }

  server.abort();
  Ok(())
}

async fn handle_change(
  config: &ShipwrightConfig,
  paths: &ProjectPaths,
  env: &[(&str, &str)],
  children: &mut Vec<ChildProcess>,
) {
  println!("  {CYAN}[shipwright]{RESET} change detected, regenerating injected data...");
  match inject::assemble(config, paths, true).and_then(|data| inject::write(&data, &paths.output)) {
    Ok(_) => println!("  {GREEN}[shipwright]{RESET} injected data updated"),
    Err(e) => {
      println!("  {RED}[shipwright]{RESET} {e:#}");
      return;
    }
  }

  if !config.dev.reload_host {
    return;
  }
  let Some(cmd) = config.dev.host_command.as_deref() else {
    return;
  };
  if let Some(pos) = children.iter().position(|c| c.label == "host") {
    let mut old = children.swap_remove(pos);
    let _ = old.child.kill().await;
    match spawn_child("host", cmd, &paths.base, env) {
      Ok(mut proc) => {
        pipe_output(&mut proc).await;
        children.push(proc);
        println!("  {CYAN}[shipwright]{RESET} host restarted");
      }
      Err(e) => println!("  {RED}[shipwright]{RESET} host restart failed: {e}"),
    }
  }
}

fn print_dev_banner(config: &ShipwrightConfig, port: u16, watched_dirs: &[String]) {
  ui::blank();
  ui::arrow(&format!("dev server on http://localhost:{port}"));
  ui::detail("injected data at /__shipwright/build-data.json");
  if !watched_dirs.is_empty() {
    ui::detail(&format!("watching {}", watched_dirs.join(", ")));
  }
  if config.dev.reload_host {
    ui::detail("host reload on change enabled");
  }
  ui::blank();
}
