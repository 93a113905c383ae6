/// Server configuration loaded from environment variables.
///
/// All fields except the API key have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Base URL of the image generation API.
    pub genai_api_url: String,
    /// API key for the image generation service. Empty when unset;
    /// generation calls then fail with a configuration error.
    pub genai_api_key: String,
    /// HTTP request timeout in seconds (default: `120`; generation units
    /// are slow).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                          |
    /// |------------------------|--------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                        |
    /// | `PORT`                 | `3000`                                           |
    /// | `GENAI_API_URL`        | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GENAI_API_KEY`        | *(empty)*                                        |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let genai_api_url = std::env::var("GENAI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());

        let genai_api_key = std::env::var("GENAI_API_KEY").unwrap_or_default();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            genai_api_url,
            genai_api_key,
            request_timeout_secs,
        }
    }
}
