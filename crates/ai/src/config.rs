//! AI provider configuration loaded from environment variables.

use serde::Deserialize;

use crate::error::AiError;

/// Default chat-completion model.
const DEFAULT_MODEL: &str = "glm-4.6";

/// Default base URL for the coding-tuned endpoint.
const DEFAULT_CODING_BASE_URL: &str = "https://api.z.ai/api/coding/paas/v4";

/// Default base URL for the general endpoint.
const DEFAULT_GENERAL_BASE_URL: &str = "https://api.z.ai/api/paas/v4";

/// Default generation timeout in seconds. Bounds the whole call,
/// including streamed body reads, so a stalled provider cannot hold the
/// relay open indefinitely.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which provider endpoint a request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Coding,
    General,
}

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider API key. Its absence is the sole "not configured"
    /// trigger for the relay endpoints.
    pub api_key: String,
    /// Base URL for [`Endpoint::Coding`].
    pub coding_base_url: String,
    /// Base URL for [`Endpoint::General`].
    pub general_base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Generation timeout in seconds.
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                               |
    /// |-----------------------|----------|---------------------------------------|
    /// | `AI_API_KEY`          | **yes**  | --                                    |
    /// | `AI_CODING_BASE_URL`  | no       | `https://api.z.ai/api/coding/paas/v4` |
    /// | `AI_GENERAL_BASE_URL` | no       | `https://api.z.ai/api/paas/v4`        |
    /// | `AI_MODEL`            | no       | `glm-4.6`                             |
    /// | `AI_TIMEOUT_SECS`     | no       | `120`                                 |
    ///
    /// Returns [`AiError::MissingApiKey`] when the key is absent so the
    /// server can start in a degraded mode where AI endpoints answer
    /// 503 instead of refusing to boot.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("AI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(AiError::MissingApiKey)?;

        let coding_base_url = std::env::var("AI_CODING_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_CODING_BASE_URL.into());
        let general_base_url = std::env::var("AI_GENERAL_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GENERAL_BASE_URL.into());
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| AiError::Transport("AI_TIMEOUT_SECS must be a valid u64".into()))?;

        Ok(Self {
            api_key,
            coding_base_url,
            general_base_url,
            model,
            timeout_secs,
        })
    }

    /// Base URL for the given endpoint selector.
    pub fn base_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Coding => &self.coding_base_url,
            Endpoint::General => &self.general_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_selector_picks_base_url() {
        let config = AiConfig {
            api_key: "k".into(),
            coding_base_url: "https://coding.example".into(),
            general_base_url: "https://general.example".into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };

        assert_eq!(config.base_url(Endpoint::Coding), "https://coding.example");
        assert_eq!(config.base_url(Endpoint::General), "https://general.example");
    }

    #[test]
    fn endpoint_deserializes_from_lowercase() {
        let coding: Endpoint = serde_json::from_str("\"coding\"").unwrap();
        let general: Endpoint = serde_json::from_str("\"general\"").unwrap();
        assert_eq!(coding, Endpoint::Coding);
        assert_eq!(general, Endpoint::General);
    }
}
