/* src/host/status.rs */

use serde::{Deserialize, Serialize};

/// Wire-level update status, carried by the `update-status` notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateStatus {
  Idle,
  Checking,
  Available,
  NotAvailable,
  Downloading,
  Downloaded,
  Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
  pub percent: f64,
  pub bytes_per_second: u64,
  pub total: u64,
}

/// Full coordinator state, including per-state payloads. Mutated only by the
/// coordinator in response to updater events.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UpdateState {
  #[default]
  Idle,
  Checking,
  Available,
  NotAvailable,
  Downloading(DownloadProgress),
  Downloaded,
  Error(String),
}

impl UpdateState {
  pub fn status(&self) -> UpdateStatus {
    match self {
      Self::Idle => UpdateStatus::Idle,
      Self::Checking => UpdateStatus::Checking,
      Self::Available => UpdateStatus::Available,
      Self::NotAvailable => UpdateStatus::NotAvailable,
      Self::Downloading(_) => UpdateStatus::Downloading,
      Self::Downloaded => UpdateStatus::Downloaded,
      Self::Error(_) => UpdateStatus::Error,
    }
  }

  pub fn progress(&self) -> Option<DownloadProgress> {
    match self {
      Self::Downloading(progress) => Some(*progress),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      Self::Error(message) => Some(message),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_serializes_kebab_case() {
    let json = serde_json::to_string(&UpdateStatus::NotAvailable).unwrap();
    assert_eq!(json, "\"not-available\"");
    let json = serde_json::to_string(&UpdateStatus::Downloading).unwrap();
    assert_eq!(json, "\"downloading\"");
  }

  #[test]
  fn state_flattens_to_status_and_payload() {
    let progress = DownloadProgress { percent: 42.0, bytes_per_second: 1024, total: 4096 };
    let state = UpdateState::Downloading(progress);
    assert_eq!(state.status(), UpdateStatus::Downloading);
    assert_eq!(state.progress(), Some(progress));
    assert!(state.error().is_none());

    let state = UpdateState::Error("boom".to_string());
    assert_eq!(state.status(), UpdateStatus::Error);
    assert_eq!(state.error(), Some("boom"));
  }
}
