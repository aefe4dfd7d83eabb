//! The tool-calling chat session.
//!
//! Unlike the staged pipeline, the model drives: it sees the tool
//! definitions, decides which data reads to make, and may chain several
//! before answering. History persists across turns so follow-up
//! questions keep their context.

use std::sync::Arc;

use ledgerlens_core::message::{Conversation, Message, Role};
use ledgerlens_core::provider::{Provider, ProviderRequest};
use ledgerlens_core::tool::{ToolCall, ToolRegistry};
use ledgerlens_core::Result;
use tracing::{debug, info, warn};

use crate::prompts;

pub struct ChatSession {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    tools: Arc<ToolRegistry>,
    conversation: Conversation,

    /// Maximum tool call iterations per turn
    max_iterations: u32,
}

impl ChatSession {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        let mut conversation = Conversation::new();
        conversation.push(Message::system(prompts::CHAT_SYSTEM_PROMPT));
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            conversation,
            max_iterations: 25,
        }
    }

    /// Set the maximum number of tool call iterations per turn.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the default max tokens per response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Drop the conversation history, keeping the system prompt.
    pub fn clear_history(&mut self) {
        self.conversation.clear_history();
    }

    /// Number of messages in the session, system prompt included.
    pub fn history_len(&self) -> usize {
        self.conversation.messages.len()
    }

    /// Process one user message and return the assistant's answer.
    ///
    /// Loops while the model requests tool calls, executing them and
    /// feeding results back, until it produces text or the iteration
    /// cap is hit.
    pub async fn process(&mut self, user_message: &str) -> Result<String> {
        info!(
            conversation_id = %self.conversation.id,
            messages = self.conversation.messages.len(),
            "Processing chat turn"
        );

        self.conversation.push(Message::user(user_message));

        let tool_definitions = self.tools.definitions();
        let mut iteration = 0;

        loop {
            iteration += 1;

            if iteration > self.max_iterations {
                warn!(
                    conversation_id = %self.conversation.id,
                    iterations = iteration,
                    "Max tool iterations reached, giving up on this turn"
                );
                break;
            }

            debug!(
                conversation_id = %self.conversation.id,
                iteration = iteration,
                "Chat loop iteration"
            );

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: self.conversation.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if response.message.tool_calls.is_empty() {
                // No tool calls, this is the final text answer.
                let answer = response.message.content.clone();
                self.conversation.push(response.message);
                return Ok(answer);
            }

            debug!(
                tool_count = response.message.tool_calls.len(),
                "Executing tool calls"
            );

            let tool_calls = response.message.tool_calls.clone();
            self.conversation.push(response.message);

            for tc in &tool_calls {
                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                };

                match self.tools.execute(&call).await {
                    Ok(tool_result) => {
                        self.conversation
                            .push(Message::tool_result(&tc.id, &tool_result.output));
                    }
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "Tool execution failed");
                        // Report the failure so the model can recover.
                        self.conversation
                            .push(Message::tool_result(&tc.id, &format!("Error: {e}")));
                    }
                }
            }

            // Loop back so the model sees the tool results.
        }

        Ok(
            "I've reached the maximum number of tool call iterations for this question. \
             Please try asking something more specific."
                .into(),
        )
    }

    /// The messages exchanged so far, excluding the system prompt.
    pub fn transcript(&self) -> impl Iterator<Item = &Message> {
        self.conversation
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
    }
}
