// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// Body returned by the chat endpoint. Both `response` and `data` may be
/// missing; `data` may also be `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseData {
    #[serde(default)]
    pub properties: Vec<PropertyListing>,
}

// Numbers stay f64: the backend forwards dataframe records, so `3` and `3.0`
// both show up on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyListing {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub bed: Option<f64>,
    #[serde(default)]
    pub bath: Option<f64>,
    #[serde(default)]
    pub house_size: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::User, data: None }
    }

    pub fn bot(text: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self { text: text.into(), sender: Sender::Bot, data }
    }

    /// Listings attached to a bot message, empty when there are none.
    pub fn properties(&self) -> &[PropertyListing] {
        self.data.as_ref().map(|d| d.properties.as_slice()).unwrap_or_default()
    }
}
