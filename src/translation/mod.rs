/*!
 * Translation machinery built on pluggable LLM backends.
 *
 * This module contains the moving parts between the caller and the LLM:
 *
 * - `backend`: the contracts a translation adapter must satisfy
 * - `response`: cleaning and whitespace normalization of raw LLM output
 * - `prompts`: prompt templates and builders
 * - `retry`: the batch-retry / single-entry-fallback state machine
 * - `orchestrator`: sequential, resumable batch processing
 * - `llm_backend`: the concrete provider-backed implementation
 */

// Re-export main types for easier usage
pub use self::backend::{ReviewBackend, ReviewItem, TranslationBackend};
pub use self::llm_backend::LlmBackend;
pub use self::orchestrator::{BatchOrchestrator, CancellationFlag, OrchestratorConfig, RunReport};
pub use self::prompts::{PromptBuilder, PromptContext};
pub use self::response::{clean_json_response, preserve_whitespace};
pub use self::retry::{FallbackRunner, RetryPolicy};

// Submodules
pub mod backend;
pub mod llm_backend;
pub mod orchestrator;
pub mod prompts;
pub mod response;
pub mod retry;
