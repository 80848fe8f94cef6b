//! REST API application layer for Intervue.
//!
//! Exposed as a library so the router and state wiring are reachable from
//! integration tests; the `intervue` binary is a thin wrapper around these
//! modules.

pub mod http;
pub mod state;
