//! Parley server: anonymous peer matchmaking and signaling relay.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
