use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8088,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_base: String,
    /// An empty key is the offline state, not an error.
    pub api_key: String,
    pub chat_model: String,
    pub analysis_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: "${GEMINI_API_KEY}".to_string(),
            chat_model: "gemini-3-pro-preview".to_string(),
            analysis_model: "gemini-2.5-flash".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub interval_secs: u64,
    pub emit_probability: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            emit_probability: 0.3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub feed: FeedConfig,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("NETGUARDIAN").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${GEMINI_API_KEY}
        app_config.server.host = expand_env(&app_config.server.host);
        app_config.gemini.api_key = expand_env(&app_config.gemini.api_key);

        Ok(app_config)
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_else(|_| "".to_string())
    } else {
        val.to_string()
    }
}
