/* src/host/coordinator.rs */

// Update/idle coordination for the host process. A single owned object
// tracks update-check status and user-idle status, decides when to poll for
// updates, and applies a downloaded update either immediately (app idle) or
// deferred until the next idle signal.
//
// All mutable state (update state, idle flag, timer handle) is owned
// exclusively by the coordinator and mutated only on its own event-handling
// turns; at most one poll timer and one in-flight check exist at any instant.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::ipc::{HostNotice, UiSignal};
use super::status::{DownloadProgress, UpdateState};

/// Events observed from the external updater. The updater downloads
/// autonomously once an update is available; the coordinator only tracks
/// state and decides when to install.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdaterEvent {
  Checking,
  Available,
  NotAvailable,
  DownloadProgress(DownloadProgress),
  Downloaded,
  Error(String),
}

/// Everything the coordinator reacts to, merged into one stream so state is
/// only ever touched from a single event-handling turn.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
  Signal(UiSignal),
  Updater(UpdaterEvent),
  PollTick,
}

/// The external updater's action surface. Hosts wire this to the real
/// auto-update machinery; tests plug in a recorder.
pub trait UpdaterBackend: Send + 'static {
  /// Kick off an update check. Results come back as [`UpdaterEvent`]s.
  fn check_for_updates(&mut self);
  /// Quit the app and apply the downloaded update.
  fn quit_and_install(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
  Development,
  Production,
}

const NOTICE_CAPACITY: usize = 64;

pub struct Coordinator<B: UpdaterBackend> {
  backend: B,
  mode: RunMode,
  /// Poll cadence; `None` when the configured interval is negative.
  poll_interval: Option<Duration>,
  state: UpdateState,
  idle: bool,
  has_update: bool,
  debug_enabled: bool,
  poll_timer: Option<JoinHandle<()>>,
  events_tx: mpsc::UnboundedSender<HostEvent>,
  events_rx: Option<mpsc::UnboundedReceiver<HostEvent>>,
  notices: broadcast::Sender<HostNotice>,
}

impl<B: UpdaterBackend> Coordinator<B> {
  /// `check_update_interval_ms < 0` disables automatic polling.
  pub fn new(mode: RunMode, check_update_interval_ms: i64, backend: B) -> Self {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
    // A zero interval is permitted by config; clamp to the minimum timer
    // period rather than panicking in the timer task.
    let poll_interval = u64::try_from(check_update_interval_ms)
      .ok()
      .map(|ms| Duration::from_millis(ms.max(1)));
    Self {
      backend,
      mode,
      poll_interval,
      state: UpdateState::Idle,
      idle: false,
      has_update: false,
      debug_enabled: false,
      poll_timer: None,
      events_tx,
      events_rx: Some(events_rx),
      notices,
    }
  }

  /// Sender for feeding signals and updater events into the running loop.
  pub fn events(&self) -> mpsc::UnboundedSender<HostEvent> {
    self.events_tx.clone()
  }

  /// One receiver per UI window; every state transition is notified.
  pub fn subscribe(&self) -> broadcast::Receiver<HostNotice> {
    self.notices.subscribe()
  }

  pub fn state(&self) -> &UpdateState {
    &self.state
  }

  pub fn is_idle(&self) -> bool {
    self.idle
  }

  pub fn has_pending_update(&self) -> bool {
    self.has_update
  }

  pub fn debug_enabled(&self) -> bool {
    self.debug_enabled
  }

  pub fn poll_timer_active(&self) -> bool {
    self.poll_timer.is_some()
  }

  /// Spawn the event loop and hand back the running handle.
  pub fn start(mut self) -> CoordinatorHandle {
    let events = self.events_tx.clone();
    let notices = self.notices.clone();
    // `start` consumes the coordinator, so the receiver is always present.
    let Some(mut rx) = self.events_rx.take() else {
      unreachable!("coordinator event receiver taken twice");
    };
    // Production hosts check once at launch; recurring polls wait for idle.
    if self.mode == RunMode::Production {
      self.check_for_updates();
    }
    let task = tokio::spawn(async move {
      while let Some(event) = rx.recv().await {
        self.dispatch(event);
      }
      self.stop();
    });
    CoordinatorHandle { events, notices, task }
  }

  /// Cancel the poll timer and drop timer state. Safe to call repeatedly.
  pub fn stop(&mut self) {
    self.cancel_poll_timer();
  }

  pub fn dispatch(&mut self, event: HostEvent) {
    match event {
      HostEvent::Signal(signal) => self.handle_signal(signal),
      HostEvent::Updater(updater) => self.handle_updater_event(updater),
      HostEvent::PollTick => self.check_for_updates(),
    }
  }

  pub fn handle_signal(&mut self, signal: UiSignal) {
    match signal {
      UiSignal::Idle => self.on_idle(),
      UiSignal::Unidle => self.on_unidle(),
      UiSignal::ToggleDebugMode => self.toggle_debug_mode(),
      UiSignal::CheckForUpdates => self.check_for_updates(),
      UiSignal::InstallUpdates => self.install_updates(),
    }
  }

  pub fn handle_updater_event(&mut self, event: UpdaterEvent) {
    match event {
      UpdaterEvent::Checking => self.set_state(UpdateState::Checking),
      UpdaterEvent::Available => {
        info!("new update found");
        self.set_state(UpdateState::Available);
      }
      UpdaterEvent::NotAvailable => {
        debug!("no update found");
        self.set_state(UpdateState::NotAvailable);
      }
      UpdaterEvent::DownloadProgress(progress) => {
        debug!(percent = progress.percent, "downloading update");
        self.set_state(UpdateState::Downloading(progress));
        // A download in progress supersedes periodic polling.
        self.cancel_poll_timer();
      }
      UpdaterEvent::Downloaded => {
        info!("new update downloaded");
        self.set_state(UpdateState::Downloaded);
        self.has_update = true;
        if self.idle {
          info!("app is idle, applying update now");
          self.install();
        }
      }
      UpdaterEvent::Error(message) => {
        error!(message, "error fetching update");
        // Non-fatal: surfaced to the UI, polling continues.
        self.set_state(UpdateState::Error(message));
      }
    }
  }

  fn on_idle(&mut self) {
    info!("app is idle");
    self.idle = true;

    if self.has_update {
      info!("update is pending, applying now");
      self.install();
    } else if self.mode == RunMode::Production && self.start_poll_timer() {
      // Check immediately; subsequent checks ride the timer.
      self.check_for_updates();
    }
  }

  fn on_unidle(&mut self) {
    if self.idle {
      debug!("app is no longer idle");
      self.idle = false;
    }
    self.cancel_poll_timer();
  }

  fn toggle_debug_mode(&mut self) {
    self.debug_enabled = !self.debug_enabled;
    info!(enabled = self.debug_enabled, "debug mode toggled");
    self.notify(HostNotice::DebugEnabled { enabled: self.debug_enabled });
  }

  /// Guarded check: a pending download satisfies the request without another
  /// network round trip, and a satisfied check retires the poll timer.
  fn check_for_updates(&mut self) {
    if self.has_update {
      self.set_state(UpdateState::Downloaded);
      self.cancel_poll_timer();
    } else {
      self.backend.check_for_updates();
    }
  }

  /// No-op unless a downloaded update is pending.
  fn install_updates(&mut self) {
    if !self.has_update {
      return;
    }
    self.install();
  }

  fn install(&mut self) {
    self.cancel_poll_timer();
    self.backend.quit_and_install();
  }

  /// Returns true when a timer was newly started. No-op when polling is
  /// disabled or a timer is already running.
  fn start_poll_timer(&mut self) -> bool {
    if self.poll_timer.is_some() {
      return false;
    }
    let Some(interval) = self.poll_interval else {
      return false;
    };

    debug!(interval_ms = interval.as_millis() as u64, "initiated update polling");
    let tx = self.events_tx.clone();
    self.poll_timer = Some(tokio::spawn(async move {
      let mut ticker = tokio::time::interval(interval);
      // The first tick of a tokio interval fires immediately; the immediate
      // check is issued by the caller, so skip it here.
      ticker.tick().await;
      loop {
        ticker.tick().await;
        if tx.send(HostEvent::PollTick).is_err() {
          break;
        }
      }
    }));
    true
  }

  /// Idempotent: tolerates an already-cleared handle.
  fn cancel_poll_timer(&mut self) {
    if let Some(timer) = self.poll_timer.take() {
      timer.abort();
    }
  }

  fn set_state(&mut self, state: UpdateState) {
    self.state = state;
    self.notify(HostNotice::from_state(&self.state));
  }

  fn notify(&self, notice: HostNotice) {
    // No subscribers is fine (e.g. before the first window opens).
    let _ = self.notices.send(notice);
  }
}

impl<B: UpdaterBackend> Drop for Coordinator<B> {
  fn drop(&mut self) {
    self.cancel_poll_timer();
  }
}

/// Handle to a started coordinator: feed it events, subscribe to notices,
/// stop it when the host shuts down.
pub struct CoordinatorHandle {
  events: mpsc::UnboundedSender<HostEvent>,
  notices: broadcast::Sender<HostNotice>,
  task: JoinHandle<()>,
}

impl CoordinatorHandle {
  pub fn signal(&self, signal: UiSignal) {
    let _ = self.events.send(HostEvent::Signal(signal));
  }

  pub fn updater_event(&self, event: UpdaterEvent) {
    let _ = self.events.send(HostEvent::Updater(event));
  }

  pub fn subscribe(&self) -> broadcast::Receiver<HostNotice> {
    self.notices.subscribe()
  }

  pub async fn stop(self) {
    drop(self.events);
    let _ = self.task.await;
  }
}
