use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Upper bound for one generation round trip.
pub const GEMINI_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for one messaging round trip.
pub const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub telegram: TelegramSettings,
    pub cors: CorsSettings,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

/// Messaging settings. Token and chat id may be absent at startup; `/notify`
/// reports the gap when it is actually invoked.
#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub bot_token: Option<Secret<String>>,
    pub chat_id: Option<String>,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the relay settings from `lookup`, which resolves a variable name
    /// to its raw value.
    pub fn from_lookup(
        common: core_config::Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let vars = Vars(lookup);

        Ok(RelayConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(vars.required("GEMINI_API_KEY")?),
                api_base: vars.or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                model: vars.or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                timeout: GEMINI_TIMEOUT,
            },
            telegram: TelegramSettings {
                bot_token: vars.optional("TELEGRAM_BOT_TOKEN").map(Secret::new),
                chat_id: vars.optional("TELEGRAM_CHAT_ID"),
                api_base: vars.or("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE),
                timeout: TELEGRAM_TIMEOUT,
            },
            cors: CorsSettings {
                allowed_origins: parse_origins(
                    vars.optional("CORS_ALLOWED_ORIGINS").as_deref().unwrap_or("*"),
                ),
            },
            otlp_endpoint: vars.optional("OTLP_ENDPOINT"),
        })
    }
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: GEMINI_TIMEOUT,
        }
    }
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            timeout: TELEGRAM_TIMEOUT,
        }
    }
}

/// Variable source; blank values count as unset.
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, AppError> {
        self.optional(key).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        })
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .map(str::to_string)
        .collect()
}
