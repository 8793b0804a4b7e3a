/*!
 * # locflow
 *
 * A Rust library for turning lists of untranslated source strings into
 * machine-translated, quality-gated output using LLM providers.
 *
 * ## Features
 *
 * - Batch translation with bounded retries and per-entry fallback
 * - Strictly sequential, resumable batch processing with clean cancellation
 * - A 3-stage agent pipeline (translate, regional review, quality gate)
 *   with all-or-nothing failure semantics and diagnostic snapshots
 * - A pure multi-dimension quality scoring engine (placeholders, HTML tags,
 *   length ratio, emptiness, untranslated-text detection)
 * - Pluggable providers: OpenAI-compatible chat completions and Anthropic
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `catalog`: Entry, record and result data model
 * - `translation`: Backends, retries, orchestration and prompts:
 *   - `translation::backend`: the backend contracts
 *   - `translation::retry`: the batch/fallback retry state machine
 *   - `translation::orchestrator`: sequential batch processing
 *   - `translation::llm_backend`: the provider-backed implementation
 * - `agents`: The translate/review/gate pipeline
 * - `quality`: The quality scoring engine
 * - `providers`: Client implementations for the LLM providers
 * - `store`: Persistence and review-queue contracts
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod agents;
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod quality;
pub mod store;
pub mod translation;

// Re-export main types for easier usage
pub use agents::{AgentPipeline, PipelineOutput, RegionalProfile};
pub use app_config::Config;
pub use app_controller::Controller;
pub use catalog::{RunSummary, TranslationEntry, TranslationRecord, TranslationResult};
pub use errors::{AppError, BackendError, PipelineError, ProviderError};
pub use quality::{QualityEvaluator, QualityGate, QualityReport};
pub use translation::{BatchOrchestrator, CancellationFlag, LlmBackend, TranslationBackend};
