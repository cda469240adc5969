use std::sync::Arc;

use flight_assistant_core::{
    ToolCallRequest, ToolCallResult, ToolDefinition, ToolManager,
};
use flight_booking_service::FlightBookingService;

use crate::tools::*;

/// Instructions handed to the model together with the tool definitions.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("./system_prompt.md");

/// An assistant builder.
///
/// See [`Assistant`].
pub struct AssistantBuilder {
    service: Arc<FlightBookingService>,
    system_prompt: Option<String>,
}

impl AssistantBuilder {
    /// Creates an assistant builder on top of a booking service.
    #[inline]
    pub fn with_service(service: Arc<FlightBookingService>) -> Self {
        Self {
            service,
            system_prompt: None,
        }
    }

    /// Replaces the default system prompt.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Builds a new assistant with every flight tool registered.
    pub fn build(self) -> Assistant {
        let service = self.service;

        let mut tools = ToolManager::default();
        tools.add_tool(ListFlightsTool::new(Arc::clone(&service)));
        tools.add_tool(GetFlightTool::new(Arc::clone(&service)));
        tools.add_tool(BookTicketsTool::new(Arc::clone(&service)));
        tools.add_tool(FindBookingTool::new(Arc::clone(&service)));
        tools.add_tool(CancelBookingTool::new(Arc::clone(&service)));

        let system_prompt = self
            .system_prompt
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.trim().to_owned());
        debug!(
            "assistant ready with tools: {:?}",
            tools
                .definitions()
                .into_iter()
                .map(|d| d.name)
                .collect::<Vec<_>>()
        );

        Assistant {
            service,
            tools,
            system_prompt,
        }
    }
}

/// The flight booking assistant as seen by an agent runtime: a system
/// prompt, a set of tool definitions, and a dispatcher for tool calls.
///
/// The model invocation loop itself lives in the runtime.
#[derive(Clone)]
pub struct Assistant {
    service: Arc<FlightBookingService>,
    tools: ToolManager,
    system_prompt: String,
}

impl Assistant {
    /// Returns the system prompt.
    #[inline]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Returns definitions of all tools, sorted by name.
    #[inline]
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    /// Returns the underlying booking service.
    #[inline]
    pub fn service(&self) -> &Arc<FlightBookingService> {
        &self.service
    }

    /// Handles one tool call from the model.
    #[inline]
    pub fn call_tool(
        &self,
        req: ToolCallRequest,
    ) -> impl Future<Output = ToolCallResult> + Send + 'static {
        self.tools.call(req)
    }

    /// Handles a batch of tool calls, returning results in request order.
    #[inline]
    pub async fn call_tools(
        &self,
        requests: Vec<ToolCallRequest>,
    ) -> Vec<ToolCallResult> {
        self.tools.call_all(requests).await
    }
}
