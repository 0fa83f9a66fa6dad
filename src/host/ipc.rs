/* src/host/ipc.rs */

// Typed messages exchanged between the two processes. The transport is
// whatever the runtime offers (in-process bus, pipe, socket); these enums
// pin the wire shape and force exhaustive handling per variant.

use serde::{Deserialize, Serialize};

use super::status::{DownloadProgress, UpdateState, UpdateStatus};

/// UI -> host signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "kebab-case")]
pub enum UiSignal {
  Idle,
  Unidle,
  ToggleDebugMode,
  CheckForUpdates,
  InstallUpdates,
}

/// Host -> UI notices, one per running window subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "kebab-case")]
pub enum HostNotice {
  UpdateStatus {
    status: UpdateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<DownloadProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
  },
  DebugEnabled {
    enabled: bool,
  },
}

impl HostNotice {
  pub fn from_state(state: &UpdateState) -> Self {
    Self::UpdateStatus {
      status: state.status(),
      progress: state.progress(),
      error: state.error().map(str::to_string),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn signals_round_trip_kebab_case() {
    let json = serde_json::to_string(&UiSignal::ToggleDebugMode).unwrap();
    assert_eq!(json, r#"{"signal":"toggle-debug-mode"}"#);
    let parsed: UiSignal = serde_json::from_str(r#"{"signal":"check-for-updates"}"#).unwrap();
    assert_eq!(parsed, UiSignal::CheckForUpdates);
  }

  #[test]
  fn update_status_notice_omits_empty_fields() {
    let notice = HostNotice::from_state(&UpdateState::Checking);
    let json = serde_json::to_string(&notice).unwrap();
    assert_eq!(json, r#"{"notice":"update-status","status":"checking"}"#);
  }

  #[test]
  fn update_status_notice_carries_progress() {
    let state = UpdateState::Downloading(DownloadProgress {
      percent: 50.0,
      bytes_per_second: 2048,
      total: 1_000_000,
    });
    let json = serde_json::to_string(&HostNotice::from_state(&state)).unwrap();
    assert!(json.contains(r#""status":"downloading""#));
    assert!(json.contains(r#""percent":50.0"#));
  }

  #[test]
  fn update_status_notice_carries_error() {
    let json =
      serde_json::to_string(&HostNotice::from_state(&UpdateState::Error("offline".into()))).unwrap();
    assert!(json.contains(r#""status":"error""#));
    assert!(json.contains(r#""error":"offline""#));
  }

  #[test]
  fn debug_enabled_notice_shape() {
    let json = serde_json::to_string(&HostNotice::DebugEnabled { enabled: true }).unwrap();
    assert_eq!(json, r#"{"notice":"debug-enabled","enabled":true}"#);
  }
}
