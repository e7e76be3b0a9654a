//! Noticeboard - message-board protocol extension
//!
//! A connection-handling extension for an event-driven server: a message
//! board posted to over plain HTTP and reachable over live sessions, with
//! authentication delegated to a sibling session extension.

pub mod board;
pub mod config;
pub mod http;
pub mod protocol;
pub mod server;
