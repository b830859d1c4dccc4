/*!
 * Tests for application configuration functionality
 */

use bipdf::app_config::{Config, LogLevel, TranslationProvider};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ar");
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.get_model(), "google/gemini-2.5-flash");
    assert_eq!(config.translation.get_endpoint(), "https://ai.gateway.lovable.dev/v1");
    assert_eq!(config.translation.optimal_concurrent_requests(), 1);
    assert_eq!(config.translation.get_timeout_secs(), 120);
    assert_eq!(config.server.port, 8787);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that a missing file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.target_language, "ar");

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.layout, config.layout);
    Ok(())
}

/// Test that partial files fall back to defaults for missing fields
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        br#"{
            "source_language": "en",
            "target_language": "fr",
            "translation": { "provider": "anthropic" },
            "layout": { "font_size": 10.0 },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(config.translation.get_model(), "claude-3-haiku-20240307");
    assert_eq!(config.translation.common.batch_size, 10);
    assert_eq!(config.layout.font_size, 10.0);
    assert_eq!(config.layout.line_height, 15.0);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that malformed files are reported with their path
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", b"{ not json")?;

    let err = Config::load_or_create(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    config.translation.common.separator = "  ".to_string();
    assert!(config.validate().is_err());
    config.translation.common.separator = "===SENTENCE_SEPARATOR===".to_string();

    config.translation.common.temperature = Some(3.5);
    assert!(config.validate().is_err());
    config.translation.common.temperature = Some(0.3);

    config.layout.line_height = 0.0;
    assert!(config.validate().is_err());
    config.layout.line_height = 15.0;

    assert!(config.validate().is_ok());
}
