//! In-memory providers for pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::errors::RagError;
use crate::llm::provider::LlmProvider;
use crate::llm::types::ChatRequest;
use crate::retriever::provider::DocumentRetriever;
use crate::retriever::types::Document;

/// Replies with scripted outputs in order, then echoes a fallback.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, String>>>,
    fallback: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted call with `reply`.
    pub fn always(reply: &str) -> Self {
        Self {
            fallback: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(text.to_string()))
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Err(message.to_string()))
    }

    fn push(self, item: Result<String, String>) -> Self {
        self.replies.lock().unwrap().push_back(item);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// System prompts of every call, in call order.
    pub fn system_prompts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.messages[0].content.clone())
            .collect()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, RagError> {
        self.requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(RagError::Llm(message)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| RagError::Llm("no scripted reply".to_string())),
        }
    }
}

/// Returns canned documents per query; unknown queries get the default set.
#[derive(Default)]
pub struct StaticRetriever {
    by_query: HashMap<String, Result<Vec<Document>, String>>,
    default: Vec<Document>,
    queries: Mutex<Vec<String>>,
}

impl StaticRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn always(documents: Vec<Document>) -> Self {
        Self {
            default: documents,
            ..Self::default()
        }
    }

    pub fn on(mut self, query: &str, documents: Vec<Document>) -> Self {
        self.by_query.insert(query.to_string(), Ok(documents));
        self
    }

    pub fn fail_on(mut self, query: &str, message: &str) -> Self {
        self.by_query
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRetriever for StaticRetriever {
    fn name(&self) -> &str {
        "static"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<Document>, RagError> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.by_query.get(query) {
            Some(Ok(documents)) => Ok(documents.clone()),
            Some(Err(message)) => Err(RagError::Retrieval(message.clone())),
            None => Ok(self.default.clone()),
        }
    }
}
