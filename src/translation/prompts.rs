/*!
 * Prompt templates and builders for translation and review calls.
 *
 * Prompts embed entries as JSON so positional context (occurrences,
 * comments, flags) reaches the model verbatim, and they pin the response
 * contract: a single JSON array or object, placeholders and HTML tags kept
 * intact.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::agents::reviewer::RegionalProfile;
use crate::catalog::TranslationEntry;
use crate::translation::backend::ReviewItem;

/// Application-level context injected into every translation prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptContext {
    /// Business domain of the application (e.g. "accounting")
    #[serde(default)]
    pub domain: String,

    /// Desired tone of voice
    #[serde(default)]
    pub tone: String,

    /// Free-form description of the application
    #[serde(default)]
    pub description: String,

    /// Term -> preferred translation
    #[serde(default)]
    pub glossary: BTreeMap<String, String>,

    /// Terms that must never be translated
    #[serde(default)]
    pub do_not_translate: Vec<String>,

    /// Full standardization guide text, appended verbatim
    #[serde(default)]
    pub standardization_guide: String,
}

impl PromptContext {
    fn is_empty(&self) -> bool {
        self.domain.is_empty()
            && self.tone.is_empty()
            && self.description.is_empty()
            && self.glossary.is_empty()
            && self.do_not_translate.is_empty()
    }
}

/// Builder for translation and review prompts.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// Human-readable target language name (e.g. "French")
    target_language: String,

    /// Application context to inject
    context: PromptContext,
}

impl PromptBuilder {
    /// Create a builder for the given target language.
    pub fn new(target_language: impl Into<String>, context: PromptContext) -> Self {
        Self {
            target_language: target_language.into(),
            context,
        }
    }

    /// Build the batch translation prompt.
    pub fn batch_prompt(&self, entries: &[TranslationEntry]) -> String {
        let mut prompt = self.preamble(true);

        prompt.push_str(
            "\nReturn YOUR RESPONSE AS A SINGLE JSON ARRAY of objects, each with the key 'translated'.\n\
             The output array must have exactly the same number of items as the input.\n\
             Keep placeholders like `{0}` and HTML tags like `<strong>` intact.\n",
        );
        self.push_guide(&mut prompt);

        let items = serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string());
        prompt.push_str("\nItems to translate:\n");
        prompt.push_str(&items);
        prompt.push_str("\n\nOutput JSON Array (only the array of 'translated' objects):\n");
        prompt
    }

    /// Build the single-entry translation prompt.
    pub fn single_prompt(&self, entry: &TranslationEntry) -> String {
        let mut prompt = self.preamble(false);

        prompt.push_str(
            "\nReturn YOUR RESPONSE AS A SINGLE JSON OBJECT with the key 'translated'.\n\
             Keep placeholders like `{0}` and HTML tags like `<strong>` intact.\n",
        );
        self.push_guide(&mut prompt);

        let item = serde_json::to_string_pretty(entry).unwrap_or_else(|_| "{}".to_string());
        prompt.push_str("\nItem to translate:\n");
        prompt.push_str(&item);
        prompt.push_str("\n\nOutput JSON Object (only the 'translated' object):\n");
        prompt
    }

    /// Build the regional review prompt for a batch of candidates.
    pub fn review_prompt(&self, items: &[ReviewItem], profile: &RegionalProfile) -> String {
        let mut prompt = format!(
            "You are a regional language expert for {}.\n\
             Your task is to review translations and adjust them for regional appropriateness.\n\n\
             **Formality Level:** {}\n",
            profile.region, profile.formality
        );

        if !profile.cultural_context.is_empty() {
            prompt.push_str(&format!("**Cultural Context:** {}\n", profile.cultural_context));
        }

        if !profile.forbidden_terms.is_empty() {
            prompt.push_str("\n**FORBIDDEN TERMS (must replace):**\n");
            for term in &profile.forbidden_terms {
                let reason = if term.reason.is_empty() {
                    "Not appropriate for this region"
                } else {
                    term.reason.as_str()
                };
                prompt.push_str(&format!("- '{}' - Reason: {}\n", term.term, reason));
            }
        }

        if !profile.industry_jargon.is_empty() {
            prompt.push_str("\n**Industry-Specific Terms:**\n");
            for (english, local) in &profile.industry_jargon {
                prompt.push_str(&format!("- {} -> {}\n", english, local));
            }
        }

        let payload = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
        prompt.push_str(&format!(
            "\nReview these translations and adjust for regional/cultural appropriateness:\n{}\n\n\
             Return ONLY a JSON array with one element per item, in the same order:\n\
             the adjusted translation as a string, or null when no change is needed.\n",
            payload
        ));
        prompt
    }

    /// System prompt shared by all calls.
    pub fn system_prompt(&self) -> String {
        "You are a professional translator. Always respond with valid JSON only.".to_string()
    }

    fn preamble(&self, batch: bool) -> String {
        let scope = if batch {
            "Translate the following texts, considering the context where they appear in the code \
             (occurrences), developer comments (comment), and other flags (flags)."
        } else {
            "Translate the text below, considering the context where it appears in the code \
             (occurrences), developer comments (comment), and other flags (flags)."
        };

        let mut prompt = format!(
            "You are a translator specialized in business software, translating to {}.\n{}\n",
            self.target_language, scope
        );

        if self.context.is_empty() {
            return prompt;
        }

        prompt.push_str("\n**Application Context:**\n");
        if !self.context.domain.is_empty() {
            prompt.push_str(&format!("- Domain: {}\n", self.context.domain));
        }
        if !self.context.tone.is_empty() {
            prompt.push_str(&format!("- Tone of Voice: {}\n", self.context.tone));
        }
        if !self.context.description.is_empty() {
            prompt.push_str(&format!("- Description: {}\n", self.context.description));
        }

        if !self.context.glossary.is_empty() {
            prompt.push_str("\n**Glossary (Term -> Translation):**\n");
            for (term, translation) in &self.context.glossary {
                prompt.push_str(&format!("- {}: {}\n", term, translation));
            }
        }

        if !self.context.do_not_translate.is_empty() {
            prompt.push_str("\n**DO NOT TRANSLATE these terms:**\n");
            prompt.push_str(&self.context.do_not_translate.join(", "));
            prompt.push('\n');
        }

        prompt
    }

    fn push_guide(&self, prompt: &mut String) {
        if !self.context.standardization_guide.is_empty() {
            prompt.push_str(&format!(
                "\n**Standardization Guide:**\n{}\nFollow this guide strictly.\n",
                self.context.standardization_guide
            ));
        }
    }
}
