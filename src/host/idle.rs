/* src/host/idle.rs */

// Idle detection. The UI process reports activity; after a configurable
// inactivity window the tracker emits `Idle`, and the first activity after
// that emits `Unidle`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::ipc::UiSignal;

pub struct IdleTracker {
  timeout: Duration,
  out: mpsc::UnboundedSender<UiSignal>,
  idle: Arc<AtomicBool>,
  timer: Option<JoinHandle<()>>,
}

impl IdleTracker {
  pub fn new(timeout: Duration, out: mpsc::UnboundedSender<UiSignal>) -> Self {
    Self { timeout, out, idle: Arc::new(AtomicBool::new(false)), timer: None }
  }

  /// Call on any user activity. Resets the inactivity window; if the app was
  /// idle, emits `Unidle` exactly once.
  pub fn activity(&mut self) {
    if self.idle.swap(false, Ordering::SeqCst) {
      let _ = self.out.send(UiSignal::Unidle);
    }

    if let Some(timer) = self.timer.take() {
      timer.abort();
    }

    let idle = self.idle.clone();
    let out = self.out.clone();
    let timeout = self.timeout;
    self.timer = Some(tokio::spawn(async move {
      tokio::time::sleep(timeout).await;
      idle.store(true, Ordering::SeqCst);
      let _ = out.send(UiSignal::Idle);
    }));
  }

  pub fn is_idle(&self) -> bool {
    self.idle.load(Ordering::SeqCst)
  }

  /// Idempotent; tolerates a never-armed or already-cleared timer.
  pub fn stop(&mut self) {
    if let Some(timer) = self.timer.take() {
      timer.abort();
    }
  }
}

impl Drop for IdleTracker {
  fn drop(&mut self) {
    self.stop();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test(start_paused = true)]
  async fn emits_idle_after_timeout() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tracker = IdleTracker::new(Duration::from_secs(60), tx);

    tracker.activity();
    assert!(!tracker.is_idle());

    let signal = rx.recv().await.unwrap();
    assert_eq!(signal, UiSignal::Idle);
    assert!(tracker.is_idle());
  }

  #[tokio::test(start_paused = true)]
  async fn activity_resets_the_window() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tracker = IdleTracker::new(Duration::from_secs(60), tx);

    tracker.activity();
    tokio::time::sleep(Duration::from_secs(30)).await;
    // Still within the window; re-arm.
    tracker.activity();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!tracker.is_idle());
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(rx.recv().await.unwrap(), UiSignal::Idle);
  }

  #[tokio::test(start_paused = true)]
  async fn unidle_fires_once_on_first_activity_after_idle() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tracker = IdleTracker::new(Duration::from_secs(10), tx);

    tracker.activity();
    assert_eq!(rx.recv().await.unwrap(), UiSignal::Idle);

    tracker.activity();
    assert_eq!(rx.recv().await.unwrap(), UiSignal::Unidle);

    // A second activity while already active emits nothing new.
    tracker.activity();
    assert!(rx.try_recv().is_err());
  }

  #[tokio::test(start_paused = true)]
  async fn stop_disarms_the_timer() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tracker = IdleTracker::new(Duration::from_secs(10), tx);

    tracker.activity();
    tracker.stop();
    tracker.stop();

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(rx.try_recv().is_err());
  }
}
