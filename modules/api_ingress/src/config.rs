use runtime::{AppConfig, DEFAULT_ALLOWED_ORIGINS};
use serde::{Deserialize, Serialize};

/// HTTP front door settings, derived from the application config.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            body_limit_bytes: 100 * 1024,
        }
    }
}

impl From<&AppConfig> for ApiIngressConfig {
    fn from(app: &AppConfig) -> Self {
        Self {
            bind_addr: app.bind_addr(),
            allowed_origins: app.cors.allowed_origins.clone(),
            body_limit_bytes: app.server.body_limit_bytes,
        }
    }
}
