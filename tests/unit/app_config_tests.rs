/*!
 * Unit tests for configuration loading and validation.
 */

use std::str::FromStr;
use std::time::Duration;

use locflow::app_config::{BackendProvider, Config, LogLevel};

#[test]
fn test_defaultConfig_shouldCarryDocumentedDefaults() {
    let config = Config::default_config("fr");

    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.common.batch_size, 100);
    assert_eq!(config.translation.common.max_batch_retries, 3);
    assert_eq!(config.translation.common.max_single_retries, 3);
    assert_eq!(config.translation.common.retry_wait_secs, 2);
    assert_eq!(config.quality.threshold, 0.8);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_configFromJson_partialDocument_shouldFillDefaults() {
    let json = r#"{
        "target_language": "pt",
        "translation": {
            "provider": "anthropic",
            "common": {"batch_size": 25}
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.target_language, "pt");
    assert_eq!(config.translation.provider, BackendProvider::Anthropic);
    assert_eq!(config.translation.common.batch_size, 25);
    // Unspecified fields fall back to defaults.
    assert_eq!(config.translation.common.max_batch_retries, 3);
    assert_eq!(config.quality.threshold, 0.8);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_invalidLanguage_shouldFail() {
    let config = Config::default_config("klingon");
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_zeroBatchSize_shouldFail() {
    let mut config = Config::default_config("fr");
    config.translation.common.batch_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_thresholdOutOfRange_shouldFail() {
    let mut config = Config::default_config("fr");
    config.quality.threshold = 1.5;
    assert!(config.validate().is_err());

    config.quality.threshold = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_zeroRetries_shouldFail() {
    let mut config = Config::default_config("fr");
    config.translation.common.max_batch_retries = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_retryPolicy_shouldMirrorCommonConfig() {
    let mut config = Config::default_config("fr");
    config.translation.common.max_batch_retries = 5;
    config.translation.common.max_single_retries = 2;
    config.translation.common.retry_wait_secs = 7;

    let policy = config.retry_policy();

    assert_eq!(policy.max_batch_retries, 5);
    assert_eq!(policy.max_single_retries, 2);
    assert_eq!(policy.retry_wait, Duration::from_secs(7));
}

#[test]
fn test_provider_fromStrAndDisplay_shouldRoundTrip() {
    for provider in [BackendProvider::OpenAI, BackendProvider::Anthropic] {
        let parsed = BackendProvider::from_str(&provider.to_string()).unwrap();
        assert_eq!(parsed, provider);
    }
    assert!(BackendProvider::from_str("gemini").is_err());
}

#[test]
fn test_getModel_shouldFallBackToProviderDefault() {
    let mut config = Config::default_config("fr");
    assert!(!config.translation.get_model().is_empty());

    config.translation.model = "my-fine-tune".to_string();
    assert_eq!(config.translation.get_model(), "my-fine-tune");
}
