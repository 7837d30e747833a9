use std::env;
use std::time::Duration;

use serde_json::Value;

use super::defaults::{
    DEFAULT_API_KEY_ENV, DEFAULT_DOC_CONTENT_CHARS_MAX, DEFAULT_LLM_BASE_URL, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_TOP_K_RESULTS, DEFAULT_WIKIPEDIA_LANG,
};
use crate::core::errors::RagError;

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    /// Fallback used when `api_key_env` is unset; normally comes from `secrets.yaml`.
    pub api_key: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl LlmSettings {
    /// The environment variable wins over the secrets file.
    pub fn resolve_api_key(&self) -> Result<String, RagError> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| RagError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            })
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            temperature: None,
            max_tokens: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub lang: String,
    pub base_url: Option<String>,
    pub top_k_results: usize,
    pub doc_content_chars_max: usize,
    pub timeout: Duration,
    pub concurrent_modalities: bool,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            lang: DEFAULT_WIKIPEDIA_LANG.to_string(),
            base_url: None,
            top_k_results: DEFAULT_TOP_K_RESULTS as usize,
            doc_content_chars_max: DEFAULT_DOC_CONTENT_CHARS_MAX as usize,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrent_modalities: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RagSettings {
    pub llm: LlmSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

impl RagSettings {
    /// Reads typed settings from an already validated config tree.
    pub fn from_config(config: &Value) -> Self {
        let llm = config.get("llm");
        let retrieval = config.get("retrieval");
        let logging = config.get("logging");
        let llm_defaults = LlmSettings::default();
        let retrieval_defaults = RetrievalSettings::default();

        let llm = LlmSettings {
            base_url: string_field(llm, "base_url").unwrap_or(llm_defaults.base_url),
            model: string_field(llm, "model").unwrap_or(llm_defaults.model),
            api_key_env: string_field(llm, "api_key_env").unwrap_or(llm_defaults.api_key_env),
            api_key: string_field(llm, "api_key"),
            temperature: llm.and_then(|v| v.get("temperature")).and_then(|v| v.as_f64()),
            max_tokens: llm
                .and_then(|v| v.get("max_tokens"))
                .and_then(|v| v.as_u64())
                .map(|v| v.min(u32::MAX as u64) as u32),
            timeout: llm
                .and_then(|v| v.get("timeout_secs"))
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs)
                .unwrap_or(llm_defaults.timeout),
        };

        let retrieval = RetrievalSettings {
            lang: string_field(retrieval, "lang").unwrap_or(retrieval_defaults.lang),
            base_url: string_field(retrieval, "base_url"),
            top_k_results: retrieval
                .and_then(|v| v.get("top_k_results"))
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(retrieval_defaults.top_k_results),
            doc_content_chars_max: retrieval
                .and_then(|v| v.get("doc_content_chars_max"))
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(retrieval_defaults.doc_content_chars_max),
            timeout: retrieval
                .and_then(|v| v.get("timeout_secs"))
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs)
                .unwrap_or(retrieval_defaults.timeout),
            concurrent_modalities: retrieval
                .and_then(|v| v.get("concurrent_modalities"))
                .and_then(|v| v.as_bool())
                .unwrap_or(retrieval_defaults.concurrent_modalities),
        };

        let logging = LoggingSettings {
            level: string_field(logging, "level").unwrap_or_else(|| "info".to_string()),
            file: logging
                .and_then(|v| v.get("file"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        };

        Self {
            llm,
            retrieval,
            logging,
        }
    }
}

fn string_field(section: Option<&Value>, key: &str) -> Option<String> {
    section
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::defaults::default_config;
    use serde_json::json;

    #[test]
    fn defaults_round_out_to_typed_settings() {
        let settings = RagSettings::from_config(&default_config());

        assert_eq!(settings.llm.model, "gpt-4o-2024-08-06");
        assert_eq!(settings.llm.api_key_env, "OPENAI_API_KEY_TP");
        assert_eq!(settings.retrieval.top_k_results, 3);
        assert_eq!(settings.retrieval.doc_content_chars_max, 4000);
        assert!(!settings.retrieval.concurrent_modalities);
        assert!(settings.llm.temperature.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let config = json!({
            "llm": { "model": "gpt-4o-mini", "temperature": 0.2, "max_tokens": 256, "timeout_secs": 5 },
            "retrieval": { "lang": "fr", "concurrent_modalities": true },
            "logging": { "level": "debug", "file": true }
        });

        let settings = RagSettings::from_config(&config);

        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.temperature, Some(0.2));
        assert_eq!(settings.llm.max_tokens, Some(256));
        assert_eq!(settings.llm.timeout, Duration::from_secs(5));
        assert_eq!(settings.retrieval.lang, "fr");
        assert!(settings.retrieval.concurrent_modalities);
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.file);
    }

    #[test]
    fn api_key_falls_back_to_secrets_value() {
        let settings = LlmSettings {
            api_key_env: "MULTIMODAL_RAG_TEST_UNSET_KEY".to_string(),
            api_key: Some("sk-from-secrets".to_string()),
            ..LlmSettings::default()
        };
        assert_eq!(settings.resolve_api_key().unwrap(), "sk-from-secrets");
    }

    #[test]
    fn missing_api_key_is_reported() {
        let settings = LlmSettings {
            api_key_env: "MULTIMODAL_RAG_TEST_UNSET_KEY".to_string(),
            ..LlmSettings::default()
        };
        let err = settings.resolve_api_key().unwrap_err();
        assert!(matches!(
            err,
            RagError::MissingApiKey { ref env_var } if env_var == "MULTIMODAL_RAG_TEST_UNSET_KEY"
        ));
    }
}
