use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;

use super::Tool;
use super::object::{BoxedToolFuture, ToolObject, ToolObjectImpl};
use crate::tool::Error;
use crate::{ToolCallRequest, ToolCallResult, ToolDefinition};

/// An object that manages a toolset and answers requests from the model.
#[derive(Clone, Default)]
pub struct ToolManager {
    tools: HashMap<String, Arc<dyn ToolObject>>,
}

impl ToolManager {
    /// Registers a tool, replacing any tool with the same name.
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        let name = tool.name().to_owned();
        if self
            .tools
            .insert(name.clone(), Arc::new(ToolObjectImpl(tool)))
            .is_some()
        {
            warn!("tool {name} registered twice, keeping the latest");
        }
    }

    /// Returns `true` if a tool named `name` is registered.
    #[inline]
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns definitions of all tools, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_owned(),
                description: tool.description().trim().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect::<Vec<_>>();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Handles one request.
    ///
    /// The returned future never fails: unknown tools, malformed arguments
    /// and execution errors are all reported through an error result, so
    /// the model always gets an answer for the request id.
    pub fn call(
        &self,
        req: ToolCallRequest,
    ) -> impl Future<Output = ToolCallResult> + Send + 'static {
        let ToolCallRequest {
            id,
            name,
            arguments,
        } = req;

        let fut: BoxedToolFuture = match self.tools.get(&name) {
            Some(tool) => {
                trace!("calling tool {name} ({id}) with args: {arguments:?}");
                tool.execute(arguments)
            }
            None => {
                warn!("tool not found: {name}");
                Box::pin(std::future::ready(Err(Error::not_found(&name))))
            }
        };

        async move {
            match fut.await {
                Ok(content) => ToolCallResult::success(id, content),
                Err(err) => {
                    debug!("tool {name} ({id}) failed: {err}");
                    ToolCallResult::error(id, &name, &err.reason())
                }
            }
        }
    }

    /// Handles a batch of requests concurrently.
    ///
    /// Results are returned in request order.
    pub async fn call_all(
        &self,
        requests: Vec<ToolCallRequest>,
    ) -> Vec<ToolCallResult> {
        let futures = {
            let span = debug_span!("tool manager", requests = requests.len());
            let _enter = span.enter();
            requests
                .into_iter()
                .map(|req| self.call(req))
                .collect::<Vec<_>>()
        };
        join_all(futures).await
    }
}
