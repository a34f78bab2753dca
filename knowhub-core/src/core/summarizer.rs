//! Content summarization through a chat-completions endpoint, with a local fallback.
//!
//! [`Summarizer::analyze_content`] never fails: a missing API key, a network
//! error, a non-success status or an unparseable answer all produce the
//! deterministic local analysis instead.

use crate::{HubError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku";
pub const MAX_TOKENS: u32 = 300;
pub const TEMPERATURE: f64 = 0.3;

/// Maximum length, in chars, of a summary taken from the model.
pub const SUMMARY_MAX_CHARS: usize = 300;
/// Length, in chars, of the truncation-based fallback summary (before `...`).
pub const FALLBACK_SUMMARY_CHARS: usize = 150;
pub const MAX_KEYWORDS: usize = 3;

/// Result of analyzing one piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizerConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: default_base_url(), model: default_model() }
    }
}

impl SummarizerConfig {
    /// The configured key, ignoring blank strings.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// A single chat-completions request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": self.prompt }],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        })
    }
}

/// Something that can answer a completion request with the assistant's text.
pub trait CompletionClient {
    /// # Errors
    ///
    /// Returns [`HubError::Http`] for transport or status failures and
    /// [`HubError::MalformedResponse`] if the body has no message text.
    fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<String>;
}

/// Extracts `choices[0].message.content` from a chat-completions response body.
///
/// # Errors
///
/// Returns [`HubError::MalformedResponse`] when the field is absent.
pub fn extract_message_text(body: &Value) -> Result<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| HubError::MalformedResponse("missing choices[0].message.content".to_string()))
}

/// Blocking client for OpenRouter's OpenAI-compatible endpoint.
#[cfg(feature = "openrouter")]
pub struct OpenRouterClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[cfg(feature = "openrouter")]
impl OpenRouterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[cfg(feature = "openrouter")]
impl CompletionClient for OpenRouterClient {
    fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<String> {
        let response = self
            .http
            .post(self.url())
            .bearer_auth(api_key)
            .header("X-Title", "Knowledge Hub")
            .json(&request.to_json())
            .send()
            .map_err(|e| HubError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Http(format!("completion endpoint returned {status}")));
        }
        let body: Value = response
            .json()
            .map_err(|e| HubError::MalformedResponse(format!("invalid JSON body: {e}")))?;
        extract_message_text(&body)
    }
}

/// Summarizes content through `C`, falling back to local analysis.
pub struct Summarizer<C> {
    config: SummarizerConfig,
    client: C,
}

#[cfg(feature = "openrouter")]
impl Summarizer<OpenRouterClient> {
    /// A summarizer talking to the configured OpenRouter endpoint.
    pub fn openrouter(config: SummarizerConfig) -> Self {
        let client = OpenRouterClient::new(&config.base_url);
        Self::new(config, client)
    }
}

impl<C: CompletionClient> Summarizer<C> {
    pub fn new(config: SummarizerConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarizes `content` and extracts up to three keywords. Never fails.
    pub fn analyze_content(&self, content: &str, title: Option<&str>) -> Analysis {
        let Some(api_key) = self.config.api_key() else {
            log::warn!("summarizer API key not configured; using local analysis");
            return local_analysis(content, title);
        };

        let request = CompletionRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(content, title),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        match self.client.complete(api_key, &request) {
            Ok(text) => parse_analysis(&text, content, title),
            Err(e) => {
                log::warn!("content analysis failed, using local analysis: {e}");
                local_analysis(content, title)
            }
        }
    }

    /// Analyzes every `(id, title, content)` triple; the result is keyed by id.
    pub fn batch_analyze<'a, I>(&self, items: I) -> HashMap<String, Analysis>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        items
            .into_iter()
            .map(|(id, title, content)| (id.to_string(), self.analyze_content(content, Some(title))))
            .collect()
    }
}

fn build_prompt(content: &str, title: Option<&str>) -> String {
    format!(
        "Analyze the following content:\n\n\
         Title: {}\n\
         Content: {content}\n\n\
         Instructions:\n\
         1. Write a summary of at most three lines.\n\
         2. Extract at most three key keywords.\n\n\
         Response format:\n\
         SUMMARY: [summary]\n\
         KEYWORDS: [keyword1, keyword2, keyword3]",
        title.unwrap_or("Untitled"),
    )
}

fn summary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)SUMMARY:\s*(.*?)\s*(?:KEYWORDS:|\z)").expect("valid regex"))
}

fn keywords_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)KEYWORDS:\s*(.*?)\s*\z").expect("valid regex"))
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Parses a `SUMMARY:` / `KEYWORDS:` answer; each missing section falls back locally.
pub fn parse_analysis(response: &str, content: &str, title: Option<&str>) -> Analysis {
    let summary = summary_re()
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(|s| truncate_chars(s, SUMMARY_MAX_CHARS))
        .unwrap_or_else(|| fallback_summary(content, title));

    let keywords: Vec<String> = keywords_re()
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| {
            m.as_str()
                .split([',', '\n'])
                .map(|k| k.trim().trim_start_matches('[').trim_end_matches(']').trim())
                .filter(|k| !k.is_empty())
                .take(MAX_KEYWORDS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let keywords = if keywords.is_empty() { extract_keywords(content) } else { keywords };
    Analysis { summary, keywords }
}

/// Truncation summary plus frequency keywords.
pub fn local_analysis(content: &str, title: Option<&str>) -> Analysis {
    Analysis {
        summary: fallback_summary(content, title),
        keywords: extract_keywords(content),
    }
}

fn fallback_summary(content: &str, title: Option<&str>) -> String {
    let content = content.trim();
    if content.is_empty() {
        return title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| truncate_chars(t, FALLBACK_SUMMARY_CHARS))
            .unwrap_or_else(|| "(empty)".to_string());
    }
    let mut summary = truncate_chars(content, FALLBACK_SUMMARY_CHARS);
    if content.chars().count() > FALLBACK_SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}

/// The most frequent words longer than two chars, ties broken by first appearance.
pub fn extract_keywords(content: &str) -> Vec<String> {
    let normalized: String = content
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in normalized.split_whitespace().filter(|w| w.chars().count() > 2) {
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(MAX_KEYWORDS).map(str::to_string).collect()
}
