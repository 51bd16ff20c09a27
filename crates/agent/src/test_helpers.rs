//! Shared test helpers: a provider that replays scripted responses.

use ragent_core::error::ProviderError;
use ragent_core::message::{Message, MessageToolCall};
use ragent_core::provider::{FinishReason, Provider, ProviderRequest, ProviderResponse, Usage};
use std::sync::Mutex;

/// A mock provider that returns a sequence of scripted responses and
/// records every request it receives.
///
/// Calls past the end of the script fail with an API error.
pub struct ScriptedProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let call = requests.len();
        requests.push(request);

        responses.get(call).cloned().ok_or_else(|| ProviderError::ApiError {
            status_code: 500,
            message: format!("script exhausted after {} responses", responses.len()),
        })
    }
}

/// A response with the given content and finish reason.
pub fn make_finish_response(text: &str, finish_reason: FinishReason) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        finish_reason,
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// A final answer.
pub fn make_text_response(text: &str) -> ProviderResponse {
    make_finish_response(text, FinishReason::Stop)
}

/// A response requesting tool calls, with optional partial content.
pub fn make_tool_call_response(tool_calls: Vec<MessageToolCall>, thought: &str) -> ProviderResponse {
    let mut response = make_finish_response(thought, FinishReason::ToolCalls);
    response.message.tool_calls = tool_calls;
    response
}

/// Helper to create a tool call.
pub fn make_tool_call(name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: serde_json::to_string(&args).unwrap(),
    }
}
