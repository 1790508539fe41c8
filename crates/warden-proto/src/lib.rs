//! # warden-proto
//!
//! The control protocol spoken between the Warden server and its three
//! caller classes: operators/schedulers, the executor, and assistant
//! managers. Messages are newline-delimited JSON over TCP; one request
//! line yields exactly one response line.

pub mod client;
pub mod codec;
pub mod message;

pub use client::Client;
pub use message::{Request, Response};
