use serde_json::{json, Value};

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY_TP";
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_WIKIPEDIA_LANG: &str = "en";
pub const DEFAULT_TOP_K_RESULTS: u64 = 3;
pub const DEFAULT_DOC_CONTENT_CHARS_MAX: u64 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Baseline configuration; `config.yml` and `secrets.yaml` are merged on top.
pub fn default_config() -> Value {
    json!({
        "llm": {
            "base_url": DEFAULT_LLM_BASE_URL,
            "model": DEFAULT_MODEL,
            "api_key_env": DEFAULT_API_KEY_ENV,
            "timeout_secs": DEFAULT_TIMEOUT_SECS
        },
        "retrieval": {
            "lang": DEFAULT_WIKIPEDIA_LANG,
            "top_k_results": DEFAULT_TOP_K_RESULTS,
            "doc_content_chars_max": DEFAULT_DOC_CONTENT_CHARS_MAX,
            "timeout_secs": DEFAULT_TIMEOUT_SECS,
            "concurrent_modalities": false
        },
        "logging": {
            "level": "info",
            "file": false
        }
    })
}
