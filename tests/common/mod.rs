#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bedrock_chat::chat::{ChatMessage, ChatProvider, ChatResponse};
use bedrock_chat::error::LLMError;
use bedrock_chat::graph::{ChatGraph, GraphBuilder};

#[derive(Debug)]
pub struct StubResponse(pub String);

impl fmt::Display for StubResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ChatResponse for StubResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Remote model stand-in: replies with a fixed text or fails with a fixed error.
pub struct StubProvider {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
    pub last_messages: Mutex<Vec<ChatMessage>>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().expect("messages lock").clone()
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().expect("messages lock") = messages.to_vec();
        match &self.reply {
            Ok(text) => Ok(Box::new(StubResponse(text.clone()))),
            Err(message) => Err(LLMError::ProviderError(message.clone())),
        }
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

pub fn graph_with(provider: Arc<StubProvider>) -> Arc<ChatGraph> {
    Arc::new(
        GraphBuilder::new()
            .provider(provider)
            .build()
            .expect("graph with stub provider"),
    )
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}
