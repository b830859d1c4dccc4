use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading, validating and saving the translation
/// service settings, including provider credentials and page layout.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Bilingual page layout
    #[serde(default)]
    pub layout: LayoutConfig,

    /// HTTP endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Environment variable holding the server-side translation secret
pub const API_KEY_ENV_VAR: &str = "TRANSLATION_API_KEY";

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI-compatible chat completions gateway
    #[default]
    OpenAI,
    // @provider: Anthropic messages API
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max concurrent batch requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                max_tokens: default_max_tokens(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                max_tokens: default_max_tokens(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for translation
    /// Placeholders: {source_language}, {target_language}, {separator}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Number of sentences sent in one request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Marker placed between sentences of a batch
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            batch_size: default_batch_size(),
            separator: default_separator(),
            temperature: None,
        }
    }
}

/// Geometry of the generated bilingual pages, in PDF units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f32,

    #[serde(default = "default_page_height")]
    pub page_height: f32,

    #[serde(default = "default_margin")]
    pub margin_left: f32,

    #[serde(default = "default_margin")]
    pub margin_top: f32,

    /// No line is placed below this height
    #[serde(default = "default_margin")]
    pub margin_bottom: f32,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Vertical advance after each line
    #[serde(default = "default_line_height")]
    pub line_height: f32,

    /// Extra gap after each source/translation pair
    #[serde(default = "default_pair_spacing")]
    pub pair_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin_left: default_margin(),
            margin_top: default_margin(),
            margin_bottom: default_margin(),
            font_size: default_font_size(),
            line_height: default_line_height(),
            pair_spacing: default_pair_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Vertical space taken by one source/translation pair
    pub fn pair_height(&self) -> f32 {
        2.0 * self.line_height + self.pair_spacing
    }

    fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(anyhow!("Page dimensions must be positive"));
        }
        if self.line_height <= 0.0 || self.font_size <= 0.0 {
            return Err(anyhow!("Line height and font size must be positive"));
        }
        if self.pair_spacing < 0.0 {
            return Err(anyhow!("Pair spacing cannot be negative"));
        }
        let usable = self.page_height - self.margin_top - self.margin_bottom;
        if usable < self.pair_height() {
            return Err(anyhow!(
                "Margins leave {:.1} units of vertical space, less than one pair of {:.1}",
                usable,
                self.pair_height()
            ));
        }
        Ok(())
    }
}

/// HTTP endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, base64 payloads included
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_batch_size() -> usize {
    crate::translation::segmenter::DEFAULT_BATCH_SIZE
}

fn default_separator() -> String {
    crate::translation::segmenter::DEFAULT_SEPARATOR.to_string()
}

fn default_page_width() -> f32 {
    595.0
}

fn default_page_height() -> f32 {
    842.0
}

fn default_margin() -> f32 {
    50.0
}

fn default_font_size() -> f32 {
    12.0
}

fn default_line_height() -> f32 {
    15.0
}

fn default_pair_spacing() -> f32 {
    10.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_max_body_bytes() -> usize {
    32 * 1024 * 1024
}

fn default_openai_endpoint() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_openai_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate each {source_language} sentence to {target_language}. \
     Keep the same number of sentences separated by {separator}. \
     Only return the translated sentences without any additional comments."
        .to_string()
}

impl Config {
    /// Load the configuration from `path`, writing a default file first when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Copy the API key from the environment into the active provider, if set
    pub fn apply_env_overrides(&mut self) {
        self.override_api_key(std::env::var(API_KEY_ENV_VAR).ok());
    }

    /// Replace the active provider's key; blank values are ignored
    pub fn override_api_key(&mut self, api_key: Option<String>) {
        if let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.translation.set_api_key(api_key);
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        if crate::language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language are the same: {} / {}",
                self.source_language,
                self.target_language
            ));
        }

        let common = &self.translation.common;
        if common.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }
        if common.separator.trim().is_empty() {
            return Err(anyhow!("Sentence separator cannot be empty"));
        }
        if let Some(temperature) = common.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", temperature));
            }
        }

        self.layout.validate()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "ar".to_string(),
            translation: TranslationConfig::default(),
            layout: LayoutConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    pub fn optimal_concurrent_requests(&self) -> usize {
        self.get_active_provider_config()
            .map(|p| p.concurrent_requests.max(1))
            .unwrap_or_else(default_concurrent_requests)
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter().find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::OpenAI => default_openai_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Override the model of the active provider
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.active_provider_config_mut().model = model.into();
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Override the API key of the active provider
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.active_provider_config_mut().api_key = api_key.into();
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::OpenAI => default_openai_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Get the completion token limit for the active provider
    pub fn get_max_tokens(&self) -> u32 {
        self.get_active_provider_config()
            .map(|p| p.max_tokens)
            .filter(|tokens| *tokens > 0)
            .unwrap_or_else(default_max_tokens)
    }

    fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let position = self
            .available_providers
            .iter()
            .position(|p| p.provider_type == provider_str);
        let index = match position {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::OpenAI),
                ProviderConfig::new(TranslationProvider::Anthropic),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
