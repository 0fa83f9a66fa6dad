/* src/host/mod.rs */

//! Runtime support for the privileged host process: the update/idle
//! coordinator, the typed IPC message set, and idle detection. Generated
//! projects embed this; the CLI never runs it.

mod coordinator;
mod idle;
mod ipc;
mod status;

pub use coordinator::{
  Coordinator, CoordinatorHandle, HostEvent, RunMode, UpdaterBackend, UpdaterEvent,
};
pub use idle::IdleTracker;
pub use ipc::{HostNotice, UiSignal};
pub use status::{DownloadProgress, UpdateState, UpdateStatus};
