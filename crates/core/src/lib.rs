//! Tool calling plumbing shared by agent front ends.
//!
//! An agent runtime asks for [`ToolDefinition`]s to advertise to the model,
//! then forwards every [`ToolCallRequest`] the model emits. The
//! [`ToolManager`] dispatches requests to typed [`Tool`] implementations and
//! always answers with a [`ToolCallResult`], turning failures into error
//! messages the model can read.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod request;
pub mod tool;

pub use request::{ToolCallRequest, ToolCallResult, ToolDefinition};
pub use tool::{Tool, ToolManager, ToolResult};
