// src/services/widget.rs
use crate::error::RequestFailure;
use crate::message::{ChatResponse, Message};
use crate::services::backend::ChatBackend;

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Everything the widget draws from. Lives as long as the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub messages: Vec<Message>,
    pub input: String,
    pub loading: bool,
}

#[derive(Debug, Default)]
pub struct ChatWidget {
    state: SessionState,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Replace the input buffer. Edits are refused while a request is out.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if self.state.loading {
            return false;
        }
        self.state.input = text.into();
        true
    }

    pub fn can_submit(&self) -> bool {
        !self.state.loading && !self.state.input.trim().is_empty()
    }

    /// Move the input into the transcript and mark a request as in flight.
    /// Returns the text to send, or `None` when there is nothing to do.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let text = std::mem::take(&mut self.state.input);
        self.state.messages.push(Message::user(text.clone()));
        self.state.loading = true;
        Some(text)
    }

    /// Fold the outcome of a request back in. Always exactly one bot message.
    pub fn complete(&mut self, result: Result<ChatResponse, RequestFailure>) {
        let reply = match result {
            Ok(resp) => Message::bot(resp.response, resp.data),
            Err(err) => {
                tracing::error!(error = %err, "chat request failed");
                Message::bot(FALLBACK_REPLY, None)
            }
        };
        self.state.messages.push(reply);
        self.state.loading = false;
    }

    pub async fn submit<B: ChatBackend>(&mut self, backend: &B) -> bool {
        let Some(text) = self.begin_submit() else {
            return false;
        };
        let result = backend.send(&text).await;
        self.complete(result);
        true
    }
}
