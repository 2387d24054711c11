//! Data Transfer Objects (DTOs) for the peer chat protocol.
//!
//! - `websocket`: events exchanged over the `/ws` connection
//! - `conversion`: mapping between DTOs and domain types

pub mod conversion;
pub mod websocket;
