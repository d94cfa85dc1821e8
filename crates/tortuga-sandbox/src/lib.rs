//! Sandbox side of the Tortuga playground.
//!
//! This crate owns the long-lived embedded interpreter, the script-facing
//! drawing API installed into it, and the reset protocol that lets one
//! interpreter be reused across independent runs without leaking state
//! between them. Everything a run does is reported to the host as an
//! ordered stream of [`tortuga_types::Event`] records; the host never
//! reaches into the sandbox directly.

mod api;
mod emitter;
mod env;
mod error;
mod runtime;
mod turtle;
#[cfg(not(target_arch = "wasm32"))]
mod worker;

pub use emitter::{BufferSink, ChannelSink, EventSink};
pub use env::SandboxEnv;
pub use error::{ApiError, SandboxError};
pub use runtime::{InterruptHandle, RunOutcome, SandboxConfig, SandboxRuntime};
pub use turtle::{Turtle, TurtleFactory};
#[cfg(not(target_arch = "wasm32"))]
pub use worker::SandboxWorker;
