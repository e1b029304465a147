//! Country → port → goods quotation form.
//!
//! The library half holds everything that does not need a renderer: the
//! catalogue entities, the selection state machine, pricing, the typed data
//! client and the axum proxy that forwards to the remote catalogue service.

pub mod config;
pub mod domain;
pub mod infra;
pub mod telemetry;
pub mod util;
