/*!
 * Provider implementations for different LLM services.
 *
 * This module contains client implementations for the supported providers:
 * - OpenAI-compatible chat completions (OpenAI, Groq, OpenRouter)
 * - Anthropic Messages API
 * - A scriptable mock backend for tests
 */

pub mod anthropic;
pub mod mock;
pub mod openai;
