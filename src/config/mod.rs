use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// API key sent as `X-API-Key` to the automation service
    pub automation_api_key: String,

    /// Automation service origin, without trailing path
    #[serde(default = "default_automation_base_url")]
    pub automation_base_url: String,

    /// Browser profile requested for each automation run
    #[serde(default = "default_browser_profile")]
    pub browser_profile: String,

    /// Country code for the automation proxy egress
    #[serde(default = "default_proxy_country_code")]
    pub proxy_country_code: String,

    /// Run timeout forwarded to the automation service, in seconds
    #[serde(default = "default_automation_timeout_secs")]
    pub automation_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_automation_base_url() -> String {
    "https://mino.ai".to_string()
}

fn default_browser_profile() -> String {
    "stealth".to_string()
}

fn default_proxy_country_code() -> String {
    "US".to_string()
}

fn default_automation_timeout_secs() -> u64 {
    120
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the handler cannot serve requests with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.automation_api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.automation_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "AUTOMATION_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Configuration pointing at `base_url`, with defaults for everything else.
    pub fn with_api_key(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            bind_addr: default_bind_addr(),
            automation_api_key: api_key.into(),
            automation_base_url: base_url.into(),
            browser_profile: default_browser_profile(),
            proxy_country_code: default_proxy_country_code(),
            automation_timeout_secs: default_automation_timeout_secs(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("AUTOMATION_API_KEY must not be empty")]
    EmptyApiKey,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
