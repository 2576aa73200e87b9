use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // OpenAI
    pub openai_api_key: String,
    pub openai_model: String,
    // Azure Speech
    pub azure_speech_key: String,
    pub azure_speech_region: String,
    // Supabase Storage
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub audio_bucket: String,
    // Audio cache
    pub audio_cache_enabled: bool,
    // Upstream bounds
    pub upstream_timeout_secs: u64,
    pub assistant_run_timeout_secs: u64,
    pub assistant_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            azure_speech_key: env::var("AZURE_SPEECH_KEY")?,
            azure_speech_region: env::var("AZURE_SPEECH_REGION")?,
            supabase_url: env::var("SUPABASE_URL")?,
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")?,
            audio_bucket: env::var("AUDIO_BUCKET").unwrap_or_else(|_| "audio".to_string()),
            audio_cache_enabled: env::var("AUDIO_CACHE_ENABLED")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            assistant_run_timeout_secs: env::var("ASSISTANT_RUN_TIMEOUT_SECS")
                .unwrap_or_else(|_| "90".to_string())
                .parse()?,
            assistant_poll_interval_ms: env::var("ASSISTANT_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn assistant_run_timeout(&self) -> Duration {
        Duration::from_secs(self.assistant_run_timeout_secs)
    }

    pub fn assistant_poll_interval(&self) -> Duration {
        Duration::from_millis(self.assistant_poll_interval_ms)
    }
}
