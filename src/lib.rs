#![doc(test(attr(deny(warnings))))]

//! Kasa Core implements the shared cash pool ("ortak kasa") ledger: named
//! value groups, an append-only history of applied inputs, pending-entry
//! batching, and JSON persistence with import/export.

pub mod errors;
pub mod ledger;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Kasa Core tracing initialized.");
    });
}
