use serde_json::{Map, Value};

/// A retrieved unit of text. `metadata["title"]` is its identity for deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub content: String,
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(content: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// A document whose only metadata is its title.
    pub fn titled(title: impl Into<String>, content: impl Into<String>) -> Self {
        let mut metadata = Map::new();
        metadata.insert("title".to_string(), Value::String(title.into()));
        Self::new(content, metadata)
    }

    /// The `title` metadata entry; missing or non-string titles read as `""`.
    pub fn title(&self) -> &str {
        self.metadata
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }
}
