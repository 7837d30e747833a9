use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use super::provider::DocumentRetriever;
use super::types::Document;
use crate::core::config::RetrievalSettings;
use crate::core::errors::RagError;

/// MediaWiki rejects longer `srsearch` values.
const MAX_QUERY_CHARS: usize = 300;
const USER_AGENT: &str = concat!("multimodal-rag/", env!("CARGO_PKG_VERSION"));

/// Searches Wikipedia and loads the plain-text extract of each hit.
#[derive(Clone)]
pub struct WikipediaRetriever {
    api_url: String,
    lang: String,
    top_k_results: usize,
    doc_content_chars_max: usize,
    client: Client,
}

impl WikipediaRetriever {
    pub fn new(settings: &RetrievalSettings) -> Result<Self, RagError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(RagError::internal)?;

        let api_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", settings.lang));

        Ok(Self {
            api_url,
            lang: settings.lang.clone(),
            top_k_results: settings.top_k_results,
            doc_content_chars_max: settings.doc_content_chars_max,
            client,
        })
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>, RagError> {
        let url = format!(
            "{}?action=query&list=search&format=json&formatversion=2&srlimit={}&srsearch={}",
            self.api_url,
            self.top_k_results,
            urlencoding::encode(query)
        );
        let payload = self.get_json(&url).await?;
        Ok(parse_search_titles(&payload))
    }

    async fn load_page(&self, title: &str) -> Result<Option<Document>, RagError> {
        let url = format!(
            "{}?action=query&prop=extracts%7Cinfo&explaintext=1&inprop=url&redirects=1&format=json&formatversion=2&titles={}",
            self.api_url,
            urlencoding::encode(title)
        );
        let payload = self.get_json(&url).await?;
        Ok(parse_page(&payload, &self.lang, self.doc_content_chars_max))
    }

    async fn get_json(&self, url: &str) -> Result<Value, RagError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RagError::retrieval)?;

        if !response.status().is_success() {
            return Err(RagError::Retrieval(format!(
                "Wikipedia request failed: {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await.map_err(RagError::retrieval)?;
        if let Some(info) = payload
            .get("error")
            .and_then(|e| e.get("info"))
            .and_then(|v| v.as_str())
        {
            return Err(RagError::Retrieval(format!("Wikipedia API error: {}", info)));
        }
        Ok(payload)
    }
}

#[async_trait]
impl DocumentRetriever for WikipediaRetriever {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<Document>, RagError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let query = truncate_chars(query, MAX_QUERY_CHARS);

        let titles = self.search_titles(&query).await?;
        let mut documents = Vec::with_capacity(titles.len());
        for title in titles {
            match self.load_page(&title).await? {
                Some(doc) => documents.push(doc),
                None => tracing::debug!("Skipping Wikipedia page without content: {}", title),
            }
        }

        tracing::debug!(
            "Wikipedia returned {} documents for '{}'",
            documents.len(),
            query
        );
        Ok(documents)
    }
}

fn parse_search_titles(payload: &Value) -> Vec<String> {
    payload
        .get("query")
        .and_then(|q| q.get("search"))
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("title").and_then(|v| v.as_str()))
                .filter(|title| !title.is_empty())
                .map(|title| title.to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_page(payload: &Value, lang: &str, max_chars: usize) -> Option<Document> {
    let page = payload
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(|v| v.as_array())
        .and_then(|pages| pages.first())?;

    if page.get("missing").is_some() || page.get("invalid").is_some() {
        return None;
    }

    let title = page.get("title").and_then(|v| v.as_str())?;
    let extract = page
        .get("extract")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or("");
    if extract.is_empty() {
        return None;
    }

    let source = page
        .get("fullurl")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            format!(
                "https://{}.wikipedia.org/wiki/{}",
                lang,
                urlencoding::encode(&title.replace(' ', "_"))
            )
        });

    let mut metadata = Map::new();
    metadata.insert("title".to_string(), Value::String(title.to_string()));
    metadata.insert("summary".to_string(), Value::String(first_paragraph(extract)));
    metadata.insert("source".to_string(), Value::String(source));

    Some(Document::new(truncate_chars(extract, max_chars), metadata))
}

fn first_paragraph(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or("")
        .to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
