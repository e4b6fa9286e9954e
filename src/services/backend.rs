// src/services/backend.rs
use std::future::Future;

use reqwest::{Client, Url};

use crate::error::RequestFailure;
use crate::message::{ChatRequest, ChatResponse};

/// Whatever answers a chat message. The widget only needs one call.
pub trait ChatBackend: Send + Sync {
    fn send(&self, message: &str) -> impl Future<Output = Result<ChatResponse, RequestFailure>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    pub fn new(endpoint: Url) -> Self {
        Self { client: Client::new(), endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ChatBackend for HttpBackend {
    async fn send(&self, message: &str) -> Result<ChatResponse, RequestFailure> {
        let body = ChatRequest { message: message.to_string() };
        tracing::debug!(endpoint = %self.endpoint, len = message.len(), "posting chat message");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatResponse = response.json().await?;
        tracing::debug!(
            properties = reply.data.as_ref().map_or(0, |d| d.properties.len()),
            "chat reply received"
        );
        Ok(reply)
    }
}
