//! HTTP transport for the area check: the `POST /api/area-check` endpoint
//! and an [`elec_core::AreaChecker`] that calls it.

mod client;
mod factory;
pub mod server;
mod wire;

pub use client::HttpAreaChecker;
pub use factory::{DEFAULT_ENDPOINT, HttpCheckerFactory};
pub use wire::{AreaCheckRequest, ErrorBody};
