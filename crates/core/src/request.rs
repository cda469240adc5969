use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes a tool that can be advertised to the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// This is a [JSON schema](https://json-schema.org/) describing the
    /// argument object.
    pub parameters: Value,
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The unique identifier for the tool call request.
    #[serde(default)]
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The argument object to pass to the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// The result of calling a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The result of the tool call.
    pub content: String,
    /// Whether `content` describes a failure.
    #[serde(default)]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful result.
    #[inline]
    pub fn success<S1: Into<String>, S2: Into<String>>(id: S1, content: S2) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Creates an error result for the tool `name`.
    #[inline]
    pub fn error<S: Into<String>>(id: S, name: &str, reason: &str) -> Self {
        Self {
            id: id.into(),
            content: format!("ERROR calling tool {name}: {reason}"),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: ToolCallRequest =
            serde_json::from_value(json!({ "name": "list_flights" })).unwrap();
        assert_eq!(req.id, "");
        assert_eq!(req.arguments, Value::Null);
    }

    #[test]
    fn test_error_result_content() {
        let result =
            ToolCallResult::error("call_1", "get_flight", "Flight 'X' not found");
        assert!(result.is_error);
        assert_eq!(
            result.content,
            "ERROR calling tool get_flight: Flight 'X' not found"
        );
    }
}
