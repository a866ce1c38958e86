use serde::Deserialize;

/// Configuration options for the grocery admin server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the remote grocery API, without a trailing slash.
    pub api_url: String,
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Secret used to sign session and flash cookies; a random key is
    /// generated when absent or too short.
    #[serde(default)]
    pub session_secret: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}
