// src/status/mod.rs
// =============================================================================
// This module talks to the mirror's backend status API.
//
// Submodules:
// - fetch: The HTTP calls and the ServiceStatus snapshot type
//
// This file (mod.rs) re-exports the public API so callers can write
// `status::load_status()` instead of `status::fetch::load_status()`.
// =============================================================================

mod fetch;

pub use fetch::{healthcheck, load_status, ServiceStatus};
