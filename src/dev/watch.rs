/* src/dev/watch.rs */

use anyhow::Result;
use notify::{RecommendedWatcher, Watcher};

pub(super) fn setup_watcher() -> Result<(RecommendedWatcher, tokio::sync::mpsc::Receiver<()>)> {
  let (tx, rx) = tokio::sync::mpsc::channel(16);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| {
      match res {
        Ok(_) => {
          let _ = tx.blocking_send(());
        }
        Err(e) => tracing::warn!("file watcher error: {e}"),
      }
    },
    notify::Config::default(),
  )?;
  // Directories are attached in run_dev after watcher creation
  Ok((watcher, rx))
}

pub(super) fn watch_dir(
  watcher: &mut RecommendedWatcher,
  base_dir: &std::path::Path,
  rel: &str,
  watched: &mut Vec<String>,
) -> Result<()> {
  let path = base_dir.join(rel);
  if path.exists() {
    watcher.watch(&path, notify::RecursiveMode::Recursive)?;
    watched.push(format!("{rel}/"));
  }
  Ok(())
}
