//! Tool trait — the abstraction over functions the model may call.
//!
//! Tools are registered once per session in a [`ToolRegistry`], which maps a
//! unique name to a description, an argument schema, and a handler. The
//! dispatch loop resolves every model-issued call through the registry; a
//! lookup miss is the single `UnknownTool` check.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use crate::error::ToolError;
use crate::message::MessageToolCall;
use crate::provider::ToolDefinition;

/// A request to execute a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON object
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Decode a tool call as emitted inside an assistant message.
    ///
    /// Blank or `null` arguments become an empty object; anything that is not
    /// a JSON object is rejected.
    pub fn from_message(call: &MessageToolCall) -> std::result::Result<Self, ToolError> {
        let raw = call.arguments.trim();
        let arguments = if raw.is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments {
                tool_name: call.name.clone(),
                reason: e.to_string(),
            })?
        };

        let arguments = match arguments {
            serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
            obj @ serde_json::Value::Object(_) => obj,
            other => {
                return Err(ToolError::InvalidArguments {
                    tool_name: call.name.clone(),
                    reason: format!("expected a JSON object, got {other}"),
                });
            }
        };

        Ok(Self {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments,
        })
    }
}

/// The result of a tool execution.
///
/// A business failure ("order cannot be cancelled") is still an `Ok`
/// result with `success == false`: the model narrates it to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the requested action was carried out
    pub success: bool,

    /// The text fed back to the model
    pub output: String,

    /// Optional structured data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolResult {
    /// A successful, text-only result.
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            data: None,
        }
    }

    /// A business failure described for the model.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            output: reason.into(),
            data: None,
        }
    }
}

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "GetMyName").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: serde_json::Value) -> std::result::Result<ToolResult, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// JSON Schema of a tool that takes no arguments.
pub fn no_arguments() -> serde_json::Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

type Handler =
    Arc<dyn Fn(serde_json::Value) -> BoxFuture<'static, std::result::Result<ToolResult, ToolError>> + Send + Sync>;

/// A tool whose handler is a closure, for registering functions inline.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: serde_json::Value,
    handler: Handler,
}

impl FunctionTool {
    /// Wrap an async handler.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
        handler: F,
    ) -> Self
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<ToolResult, ToolError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }

    /// Wrap a synchronous, argument-less function returning text.
    pub fn returning<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(name, description, no_arguments(), move |_| {
            let f = Arc::clone(&f);
            async move { Ok(ToolResult::text(f())) }
        })
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        self.parameters.clone()
    }

    async fn execute(&self, arguments: serde_json::Value) -> std::result::Result<ToolResult, ToolError> {
        (self.handler)(arguments).await
    }
}

/// A name-keyed registry of available tools.
///
/// Read-only once handed to the dispatch loop. Definitions are reported in
/// registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Names are unique per registry.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> std::result::Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style registration.
    pub fn with(mut self, tool: impl Tool + 'static) -> std::result::Result<Self, ToolError> {
        self.register(Box::new(tool))?;
        Ok(self)
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> std::result::Result<&dyn Tool, ToolError> {
        self.index
            .get(name)
            .map(|&i| self.tools[i].as_ref())
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Get all tool definitions (for sending to the LLM).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Resolve and execute a tool call.
    pub async fn execute(&self, call: &ToolCall) -> std::result::Result<ToolResult, ToolError> {
        let tool = self.resolve(&call.name)?;
        tool.execute(call.arguments.clone()).await
    }

    /// List all registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str { "echo" }
        fn description(&self) -> &str { "Echoes back the input" }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }
        async fn execute(&self, arguments: serde_json::Value) -> std::result::Result<ToolResult, ToolError> {
            let text = arguments["text"].as_str().unwrap_or("").to_string();
            Ok(ToolResult::text(text))
        }
    }

    fn call(name: &str, arguments: &str) -> MessageToolCall {
        MessageToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    #[test]
    fn registry_register_and_resolve() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        assert!(registry.resolve("echo").is_ok());
        assert!(matches!(
            registry.resolve("nonexistent"),
            Err(ToolError::UnknownTool(name)) if name == "nonexistent"
        ));
    }

    #[test]
    fn registry_rejects_duplicate_names() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let err = registry.register(Box::new(EchoTool)).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn definitions_follow_registration_order() {
        let registry = ToolRegistry::new()
            .with(FunctionTool::returning("GetMyName", "name", || "Carlos".into()))
            .unwrap()
            .with(EchoTool)
            .unwrap()
            .with(FunctionTool::returning("GetMyAge", "age", || "42".into()))
            .unwrap();
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["GetMyName", "echo", "GetMyAge"]);
        assert_eq!(registry.names(), vec!["GetMyName", "echo", "GetMyAge"]);
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let registry = ToolRegistry::new().with(EchoTool).unwrap();
        let call = ToolCall::from_message(&call("echo", r#"{"text": "hello world"}"#)).unwrap();
        let result = registry.execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "hello world");
    }

    #[tokio::test]
    async fn registry_execute_missing_tool() {
        let registry = ToolRegistry::new();
        let call = ToolCall::from_message(&call("nonexistent", "{}")).unwrap();
        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn function_tool_runs_closure() {
        let tool = FunctionTool::new(
            "Shout",
            "Upper-cases text",
            serde_json::json!({ "type": "object" }),
            |args| async move {
                let text = args["text"].as_str().unwrap_or_default().to_uppercase();
                Ok(ToolResult::text(text))
            },
        );
        let result = tool.execute(serde_json::json!({ "text": "hola" })).await.unwrap();
        assert_eq!(result.output, "HOLA");
        assert_eq!(tool.to_definition().parameters["type"], "object");
    }

    #[test]
    fn blank_arguments_become_empty_object() {
        let decoded = ToolCall::from_message(&call("GetMyName", "  ")).unwrap();
        assert!(decoded.arguments.as_object().unwrap().is_empty());

        let decoded = ToolCall::from_message(&call("GetMyName", "null")).unwrap();
        assert!(decoded.arguments.is_object());
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        let err = ToolCall::from_message(&call("PrintOrder", "{not json")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool_name, .. } if tool_name == "PrintOrder"));

        let err = ToolCall::from_message(&call("PrintOrder", "[1, 2]")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }
}
