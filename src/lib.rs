#![doc(test(attr(deny(warnings))))]

//! Budget Wise tracks income and expenses, expands recurring entries into
//! concrete transactions and aggregates them over calendar periods.
//!
//! The engine lives in `wise-core`; this crate hosts the session facade,
//! tracing setup and the command line front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod utils;

pub use wise_core as engine;
pub use wise_domain as domain;

/// Initializes global tracing. Safe to call more than once.
pub fn init() {
    utils::init_tracing();
}
