/* src/lib.rs */

//! Build tooling for browser-shell desktop apps: project scaffolding, the
//! route inferencer and locale aggregator, the production build and
//! packaging pipeline, the dev loop, and the host-side update/idle
//! coordinator that generated projects link against.

pub mod build;
pub mod clean;
pub mod config;
pub mod dev;
pub mod host;
pub mod init;
pub mod lint;
pub mod locales;
pub mod pack;
pub mod patch;
pub mod paths;
pub mod routes;
pub mod shell;
pub mod ui;
pub mod upgrade;
