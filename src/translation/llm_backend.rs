/*!
 * The concrete LLM-backed translation backend.
 *
 * One backend serves every provider: retry/fallback/whitespace logic lives
 * with the callers, prompt wording lives in `prompts`, and this module only
 * does the round-trip: build prompt, call provider, clean and parse the
 * response, normalize whitespace.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;

use crate::agents::reviewer::RegionalProfile;
use crate::app_config::{BackendProvider, Config};
use crate::catalog::TranslationEntry;
use crate::errors::BackendError;
use crate::language_utils::language_display_name;
use crate::providers::anthropic::{AnthropicClient, AnthropicRequest};
use crate::providers::openai::{ChatRequest, OpenAiClient};
use crate::translation::backend::{ReviewBackend, ReviewItem, TranslationBackend};
use crate::translation::prompts::PromptBuilder;
use crate::translation::response::{clean_json_response, preserve_whitespace};

/// Completion budget for translation calls.
const MAX_COMPLETION_TOKENS: u32 = 4096;

/// Provider implementation variants
enum ProviderImpl {
    /// OpenAI-compatible chat completions service
    OpenAI {
        /// Client instance
        client: OpenAiClient,
    },

    /// Anthropic Messages API service
    Anthropic {
        /// Client instance
        client: AnthropicClient,
    },
}

/// One translated item in a batch response payload.
#[derive(Debug, Deserialize)]
struct TranslatedItem {
    #[serde(default)]
    translated: String,
}

/// Single-entry response payload; a null value signals the model gave up.
#[derive(Debug, Deserialize)]
struct TranslatedSingle {
    translated: Option<String>,
}

/// LLM-backed implementation of the translation backend contract.
pub struct LlmBackend {
    provider: ProviderImpl,
    provider_name: &'static str,
    model: String,
    temperature: f32,
    prompts: PromptBuilder,
}

impl LlmBackend {
    /// Build a backend from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let language = language_display_name(&config.target_language)?;
        let prompts = PromptBuilder::new(language, config.prompt_context.clone());

        let (provider, provider_name) = match config.translation.provider {
            BackendProvider::OpenAI => (
                ProviderImpl::OpenAI {
                    client: OpenAiClient::new(
                        config.translation.api_key.clone(),
                        config.translation.get_endpoint(),
                        config.translation.timeout_secs,
                    ),
                },
                "OpenAI",
            ),
            BackendProvider::Anthropic => (
                ProviderImpl::Anthropic {
                    client: AnthropicClient::new(
                        config.translation.api_key.clone(),
                        config.translation.get_endpoint(),
                        config.translation.timeout_secs,
                    ),
                },
                "Anthropic",
            ),
        };

        Ok(Self {
            provider,
            provider_name,
            model: config.translation.get_model(),
            temperature: config.translation.common.temperature,
            prompts,
        })
    }

    /// Prompt builder used by this backend.
    pub fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }

    /// One provider round-trip returning the raw assistant text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, BackendError> {
        debug!("Prompt:\n{}", prompt);

        let text = match &self.provider {
            ProviderImpl::OpenAI { client } => {
                let request = ChatRequest::new(&self.model)
                    .add_message("system", system)
                    .add_message("user", prompt)
                    .temperature(self.temperature)
                    .max_tokens(MAX_COMPLETION_TOKENS);
                let response = client.complete(request).await?;
                OpenAiClient::extract_text(&response)
            }
            ProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(&self.model, MAX_COMPLETION_TOKENS)
                    .system(system)
                    .add_message("user", prompt)
                    .temperature(self.temperature);
                let response = client.complete(request).await?;
                AnthropicClient::extract_text(&response)
            }
        };

        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl TranslationBackend for LlmBackend {
    async fn translate_batch(
        &self,
        entries: &[TranslationEntry],
    ) -> Result<Vec<String>, BackendError> {
        info!(
            "[API Call] Translating batch of {} entries via {} ({})",
            entries.len(),
            self.provider_name,
            self.model
        );

        let prompt = self.prompts.batch_prompt(entries);
        let raw = self.complete(&self.prompts.system_prompt(), &prompt).await?;
        let cleaned = clean_json_response(&raw)?;

        let items: Vec<TranslatedItem> = serde_json::from_str(&cleaned)
            .map_err(|e| BackendError::Parse(format!("batch payload: {}", e)))?;

        // Pair positionally; the caller owns the length check.
        Ok(items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match entries.get(i) {
                Some(entry) => preserve_whitespace(&entry.source_text, &item.translated),
                None => item.translated,
            })
            .collect())
    }

    async fn translate_one(
        &self,
        entry: &TranslationEntry,
    ) -> Result<Option<String>, BackendError> {
        info!(
            "[API Call] Translating single entry via {}: '{}'",
            self.provider_name,
            entry.source_text.chars().take(50).collect::<String>()
        );

        let prompt = self.prompts.single_prompt(entry);
        let raw = self.complete(&self.prompts.system_prompt(), &prompt).await?;
        let cleaned = clean_json_response(&raw)?;

        let item: TranslatedSingle = serde_json::from_str(&cleaned)
            .map_err(|e| BackendError::Parse(format!("single payload: {}", e)))?;

        Ok(item
            .translated
            .map(|text| preserve_whitespace(&entry.source_text, &text)))
    }
}

#[async_trait]
impl ReviewBackend for LlmBackend {
    async fn review_batch(
        &self,
        items: &[ReviewItem],
        profile: &RegionalProfile,
    ) -> Result<Vec<Option<String>>, BackendError> {
        info!(
            "[API Call] Reviewing batch of {} translations via {} for region '{}'",
            items.len(),
            self.provider_name,
            profile.region
        );

        let prompt = self.prompts.review_prompt(items, profile);
        let system = "You are a regional language expert. Focus on cultural and regional \
                      appropriateness. Always respond with valid JSON only.";
        let raw = self.complete(system, &prompt).await?;
        let cleaned = clean_json_response(&raw)?;

        serde_json::from_str(&cleaned)
            .map_err(|e| BackendError::Parse(format!("review payload: {}", e)))
    }
}
