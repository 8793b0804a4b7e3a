/*!
 * Common test utilities for the locflow test suite
 */

#![allow(dead_code)]

use locflow::app_config::Config;
use locflow::catalog::TranslationEntry;
use locflow::translation::retry::RetryPolicy;

/// Initialize test logging; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a bare entry from a source string
pub fn entry(source: &str) -> TranslationEntry {
    TranslationEntry::new(source)
}

/// Create bare entries from source strings
pub fn entries(sources: &[&str]) -> Vec<TranslationEntry> {
    sources.iter().map(|s| TranslationEntry::new(*s)).collect()
}

/// Retry policy with no waits, for fast tests
pub fn fast_policy(max_batch_retries: u32, max_single_retries: u32) -> RetryPolicy {
    RetryPolicy::immediate(max_batch_retries, max_single_retries)
}

/// Configuration suitable for tests: valid language, no retry waits,
/// small batches
pub fn test_config() -> Config {
    let mut config = Config::default_config("fr");
    config.translation.common.retry_wait_secs = 0;
    config.translation.common.batch_size = 10;
    config
}
