//! Host-side runtime for the hunter engine.
//!
//! This crate wires content, configuration and the engine managers into a
//! single [`Session`] that a game loop (or a headless replay) drives:
//! - [`session`] hosts the facade exposing every inbound call
//! - [`scenario`] replays scripted host commands against a session
//! - [`config`] reads runtime settings from the environment
//! - [`error`] unifies engine, content and scenario failures
pub mod config;
pub mod error;
pub mod scenario;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use scenario::{HostCommand, ReplayReport, Scenario};
pub use session::Session;
