//! A flight booking assistant toolset.
//!
//! The crate wires [`flight_booking_service`] into tools an agent runtime
//! can advertise to a model. Use [`AssistantBuilder`] to assemble the tools
//! and the system prompt, then forward the model's tool calls to
//! [`Assistant::call_tool`]. The bundled binary runs a demo scenario and a
//! JSON-lines `Console` (behind the `console` feature) on top of the same
//! assistant.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod assistant;
#[cfg(feature = "console")]
mod console;
pub mod data;
pub mod tools;

pub use assistant::{Assistant, AssistantBuilder, DEFAULT_SYSTEM_PROMPT};
#[cfg(feature = "console")]
pub use console::Console;

/// Re-exports of [`flight_assistant_core`] crate.
pub mod core {
    pub use flight_assistant_core::*;
}

/// Re-exports of [`flight_booking_service`] crate.
pub mod service {
    pub use flight_booking_service::*;
}
