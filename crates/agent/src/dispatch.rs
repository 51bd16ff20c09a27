//! The tool-calling dispatch loop.
//!
//! Each turn sends the whole conversation plus the registered tool
//! definitions to the model and branches on the finish reason:
//!
//! - `Stop`: the assistant message is appended and its text is the answer.
//! - `ToolCalls`: the assistant message is appended, then every requested
//!   call is resolved and executed in emission order, one tool-result
//!   message per call. The loop then asks the model again.
//! - anything else: fatal.
//!
//! A handler that rejects its arguments or fails while running still
//! produces a result message (`Error: ...`) so the model can recover.

use std::sync::Arc;
use ragent_core::error::{DispatchError, Error, ToolError};
use ragent_core::message::{Conversation, Message, MessageToolCall};
use ragent_core::provider::{FinishReason, Provider, ProviderRequest, ResponseFormat, ToolDefinition};
use ragent_core::tool::{ToolCall, ToolRegistry};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Default bound on model round-trips per run.
pub const DEFAULT_MAX_ITERATIONS: u32 = 25;

/// Where the loop stands after one model turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Done(String),
}

/// Drives one conversation to a final answer.
pub struct DispatchLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tools the model may call; read-only for the loop's lifetime
    tools: Arc<ToolRegistry>,

    /// Maximum model round-trips per run
    max_iterations: u32,
}

impl DispatchLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the maximum number of model round-trips.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Run the loop until the model stops, returning its final text.
    ///
    /// Messages are only ever appended to `conversation`. Unsupported finish
    /// reasons, unknown tools, undecodable arguments, provider failures and
    /// running out of iterations abort the run; whatever was appended before
    /// the failure stays in the conversation.
    pub async fn run(&self, conversation: &mut Conversation) -> Result<String, Error> {
        self.run_with_format(conversation, None).await
    }

    /// Run the loop with the final answer constrained to `format`, then
    /// decode that answer as `T`.
    pub async fn run_structured<T: DeserializeOwned>(
        &self,
        conversation: &mut Conversation,
        format: ResponseFormat,
    ) -> Result<T, Error> {
        let answer = self.run_with_format(conversation, Some(&format)).await?;
        let value = serde_json::from_str(answer.trim()).inspect_err(|e| {
            warn!(schema = %format.name, error = %e, "Answer does not match the requested schema");
        })?;
        Ok(value)
    }

    async fn run_with_format(
        &self,
        conversation: &mut Conversation,
        format: Option<&ResponseFormat>,
    ) -> Result<String, Error> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.len(),
            tools = self.tools.len(),
            "Starting dispatch loop"
        );

        let definitions = self.tools.definitions();

        for iteration in 1..=self.max_iterations {
            debug!(conversation_id = %conversation.id, iteration, "Dispatch loop iteration");

            if let LoopState::Done(answer) = self.step(conversation, &definitions, format).await? {
                info!(
                    conversation_id = %conversation.id,
                    iterations = iteration,
                    messages = conversation.len(),
                    "Dispatch loop finished"
                );
                return Ok(answer);
            }
        }

        warn!(
            conversation_id = %conversation.id,
            limit = self.max_iterations,
            "Model still requesting tools at iteration limit"
        );
        Err(DispatchError::MaxIterationsExceeded {
            limit: self.max_iterations,
        }
        .into())
    }

    /// One model turn and, when requested, its tool calls.
    async fn step(
        &self,
        conversation: &mut Conversation,
        definitions: &[ToolDefinition],
        format: Option<&ResponseFormat>,
    ) -> Result<LoopState, Error> {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: conversation.messages().to_vec(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: definitions.to_vec(),
            response_format: format.cloned(),
        };

        let response = self.provider.complete(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %response.model,
                tokens = usage.total_tokens,
                finish_reason = %response.finish_reason,
                "Model responded"
            );
        }

        match response.finish_reason {
            FinishReason::Stop => {
                let answer = response.message.content.clone();
                conversation.push(response.message);
                Ok(LoopState::Done(answer))
            }
            FinishReason::ToolCalls => {
                let calls = response.message.tool_calls.clone();
                conversation.push(response.message);
                self.dispatch_tool_calls(conversation, &calls).await?;
                Ok(LoopState::Running)
            }
            FinishReason::Length | FinishReason::ContentFilter | FinishReason::Other(_) => {
                let reason = response.finish_reason.to_string();
                warn!(finish_reason = %reason, "Aborting on unsupported finish reason");
                Err(DispatchError::UnsupportedFinishState { reason }.into())
            }
        }
    }

    /// Execute every call in emission order, appending one result per call.
    async fn dispatch_tool_calls(
        &self,
        conversation: &mut Conversation,
        calls: &[MessageToolCall],
    ) -> Result<(), Error> {
        debug!(tool_count = calls.len(), "Executing tool calls");

        for raw in calls {
            let call = ToolCall::from_message(raw)?;
            debug!(tool = %call.name, call_id = %call.id, "Calling tool");

            let output = match self.tools.execute(&call).await {
                Ok(result) => {
                    if !result.success {
                        debug!(tool = %call.name, output = %result.output, "Tool reported failure");
                    }
                    result.output
                }
                Err(e @ (ToolError::InvalidArguments { .. } | ToolError::ExecutionFailed { .. })) => {
                    warn!(tool = %call.name, error = %e, "Tool call failed, reporting to model");
                    format!("Error: {e}")
                }
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Aborting on tool error");
                    return Err(e.into());
                }
            };

            conversation.push(Message::tool_result(call.id, call.name, output));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        ScriptedProvider, make_finish_response, make_text_response, make_tool_call,
        make_tool_call_response,
    };
    use ragent_core::message::Role;
    use ragent_core::tool::{FunctionTool, ToolResult};
    use ragent_core::provider::ResponseFormat;
    use ragent_tools::{OrderBook, profile_registry, workflow_registry};
    use serde::Deserialize;

    fn dispatch(provider: Arc<ScriptedProvider>, tools: ToolRegistry) -> DispatchLoop {
        DispatchLoop::new(provider, "mock-model", 0.0, Arc::new(tools))
    }

    fn conversation() -> Conversation {
        Conversation::from_messages([
            Message::system("Always greet the user by name"),
            Message::user("What is the capital of Vaupés?"),
        ])
    }

    #[tokio::test]
    async fn stop_returns_content() {
        let provider = Arc::new(ScriptedProvider::new(vec![make_text_response("Mitú")]));
        let mut conv = conversation();

        let answer = dispatch(provider.clone(), ToolRegistry::new())
            .run(&mut conv)
            .await
            .unwrap();

        assert_eq!(answer, "Mitú");
        assert_eq!(conv.len(), 3);
        assert_eq!(conv.last().unwrap().role, Role::Assistant);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn two_sequential_tool_calls_then_stop() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(
                vec![
                    make_tool_call("GetMyName", serde_json::json!({})),
                    make_tool_call("GetMyAge", serde_json::json!({})),
                ],
                "",
            ),
            make_text_response("Hola Carlos Estefano Garcia, you are 42. The capital is Mitú."),
        ]));
        let mut conv = conversation();

        let answer = dispatch(provider.clone(), profile_registry().unwrap())
            .run(&mut conv)
            .await
            .unwrap();
        assert!(answer.contains("Carlos"));

        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::Tool, Role::Tool, Role::Assistant]
        );

        let results = &conv.messages()[3..5];
        assert_eq!(results[0].name.as_deref(), Some("GetMyName"));
        assert_eq!(results[0].content, "Carlos Estefano Garcia");
        assert_eq!(results[0].tool_call_id.as_deref(), Some("call_GetMyName"));
        assert_eq!(results[1].name.as_deref(), Some("GetMyAge"));
        assert_eq!(results[1].content, "42");
        assert_eq!(conv.last().unwrap().content, answer);
    }

    #[tokio::test]
    async fn model_sees_results_and_tool_definitions() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(vec![make_tool_call("GetMyName", serde_json::json!({}))], ""),
            make_text_response("Hi Carlos"),
        ]));
        let mut conv = conversation();
        dispatch(provider.clone(), profile_registry().unwrap())
            .run(&mut conv)
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        let tool_names: Vec<&str> = requests[0].tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tool_names, vec!["GetMyName", "GetMyAge"]);
        assert_eq!(requests[0].messages.len(), 2);
        assert_eq!(requests[1].messages.len(), 4);
        assert_eq!(requests[1].messages[3].content, "Carlos Estefano Garcia");
    }

    #[tokio::test]
    async fn partial_content_is_kept_with_tool_calls() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(
                vec![make_tool_call("GetMyAge", serde_json::json!({}))],
                "Let me check your age first.",
            ),
            make_text_response("You are 42"),
        ]));
        let mut conv = conversation();
        dispatch(provider, profile_registry().unwrap())
            .run(&mut conv)
            .await
            .unwrap();

        let assistant = &conv.messages()[2];
        assert_eq!(assistant.content, "Let me check your age first.");
        assert!(assistant.has_tool_calls());
    }

    #[tokio::test]
    async fn unsupported_finish_reason_aborts() {
        let provider = Arc::new(ScriptedProvider::new(vec![make_finish_response(
            "cut off",
            FinishReason::Length,
        )]));
        let mut conv = conversation();

        let err = dispatch(provider.clone(), ToolRegistry::new())
            .run(&mut conv)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Dispatch(DispatchError::UnsupportedFinishState { ref reason }) if reason == "length"
        ));
        assert_eq!(provider.call_count(), 1);
        assert_eq!(conv.len(), 2);
    }

    #[tokio::test]
    async fn unknown_tool_aborts() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(vec![make_tool_call("GetMyShoeSize", serde_json::json!({}))], ""),
            make_text_response("never reached"),
        ]));
        let mut conv = conversation();

        let err = dispatch(provider.clone(), profile_registry().unwrap())
            .run(&mut conv)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Tool(ToolError::UnknownTool(ref name)) if name == "GetMyShoeSize"
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_arguments_abort() {
        let mut call = make_tool_call("GetMyName", serde_json::json!({}));
        call.arguments = "{oops".into();
        let provider = Arc::new(ScriptedProvider::new(vec![make_tool_call_response(vec![call], "")]));

        let err = dispatch(provider, profile_registry().unwrap())
            .run(&mut conversation())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::InvalidArguments { .. })));
    }

    #[tokio::test]
    async fn handler_failure_is_fed_back_to_model() {
        let flaky = FunctionTool::new(
            "LookUpWeather",
            "Weather lookup",
            ragent_core::tool::no_arguments(),
            |_| async {
                Err::<ToolResult, _>(ToolError::ExecutionFailed {
                    tool_name: "LookUpWeather".into(),
                    reason: "upstream unavailable".into(),
                })
            },
        );
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(vec![make_tool_call("LookUpWeather", serde_json::json!({}))], ""),
            make_text_response("The weather service is down"),
        ]));
        let mut conv = conversation();

        let answer = dispatch(provider, ToolRegistry::new().with(flaky).unwrap())
            .run(&mut conv)
            .await
            .unwrap();

        assert_eq!(answer, "The weather service is down");
        let result = &conv.messages()[3];
        assert_eq!(result.role, Role::Tool);
        assert!(result.content.starts_with("Error: "));
        assert!(result.content.contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn endless_tool_requests_hit_the_iteration_limit() {
        let responses = (0..3)
            .map(|_| make_tool_call_response(vec![make_tool_call("GetMyAge", serde_json::json!({}))], ""))
            .collect();
        let provider = Arc::new(ScriptedProvider::new(responses));

        let err = dispatch(provider.clone(), profile_registry().unwrap())
            .with_max_iterations(3)
            .run(&mut conversation())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Dispatch(DispatchError::MaxIterationsExceeded { limit: 3 })
        ));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn max_tokens_is_forwarded() {
        let provider = Arc::new(ScriptedProvider::new(vec![make_text_response("ok")]));
        dispatch(provider.clone(), ToolRegistry::new())
            .with_max_tokens(128)
            .run(&mut conversation())
            .await
            .unwrap();
        assert_eq!(provider.requests()[0].max_tokens, Some(128));
    }

    #[tokio::test]
    async fn wrong_argument_names_are_fed_back_to_model() {
        let book = Arc::new(OrderBook::sample());
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(
                vec![make_tool_call("GetOrderInformation", serde_json::json!({ "order_id": "XYZ123" }))],
                "",
            ),
            make_tool_call_response(
                vec![make_tool_call("GetOrderInformation", serde_json::json!({ "orderId": "XYZ123" }))],
                "",
            ),
            make_text_response("Tu orden XYZ123 sigue abierta"),
        ]));
        let mut conv = conversation();

        let answer = dispatch(provider.clone(), workflow_registry(book).unwrap())
            .run(&mut conv)
            .await
            .unwrap();

        assert_eq!(answer, "Tu orden XYZ123 sigue abierta");
        assert_eq!(provider.call_count(), 3);

        let rejected = &conv.messages()[3];
        assert_eq!(rejected.role, Role::Tool);
        assert_eq!(rejected.tool_call_id.as_deref(), Some("call_GetOrderInformation"));
        assert!(rejected.content.starts_with("Error: "));
        assert!(rejected.content.contains("orderId"));

        let accepted = &conv.messages()[5];
        assert!(accepted.content.contains("\"status\":\"open\""));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Greeting {
        name: String,
        age: u32,
    }

    fn greeting_format() -> ResponseFormat {
        ResponseFormat::json_schema(
            "Greeting",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "age": { "type": "integer" }
                },
                "required": ["name", "age"],
                "additionalProperties": false
            }),
        )
    }

    #[tokio::test]
    async fn structured_answer_is_decoded() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            make_tool_call_response(vec![make_tool_call("GetMyName", serde_json::json!({}))], ""),
            make_text_response("  {\"name\": \"Carlos Estefano Garcia\", \"age\": 42}\n"),
        ]));
        let mut conv = conversation();

        let greeting: Greeting = dispatch(provider.clone(), profile_registry().unwrap())
            .run_structured(&mut conv, greeting_format())
            .await
            .unwrap();

        assert_eq!(
            greeting,
            Greeting {
                name: "Carlos Estefano Garcia".into(),
                age: 42
            }
        );
        let requests = provider.requests();
        assert!(requests.iter().all(|r| r.response_format == Some(greeting_format())));
    }

    #[tokio::test]
    async fn structured_answer_must_match_schema() {
        let provider = Arc::new(ScriptedProvider::new(vec![make_text_response(
            "Sorry, I can only answer in prose.",
        )]));

        let err = dispatch(provider, ToolRegistry::new())
            .run_structured::<Greeting>(&mut conversation(), greeting_format())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn plain_runs_send_no_response_format() {
        let provider = Arc::new(ScriptedProvider::new(vec![make_text_response("ok")]));
        dispatch(provider.clone(), ToolRegistry::new())
            .run(&mut conversation())
            .await
            .unwrap();
        assert!(provider.requests()[0].response_format.is_none());
    }
}
