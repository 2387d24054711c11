//! Parley CLI client.
//!
//! Joins the matchmaking queue, prints what the server says and sends each
//! typed line to the matched peer.

pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
