/// Errors from the AI provider client.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// `AI_API_KEY` is absent: a deployment/config error, not a
    /// per-request failure.
    #[error("missing api key: AI_API_KEY environment variable not set")]
    MissingApiKey,

    /// The provider rejected the configured key.
    #[error("provider rejected the API key")]
    InvalidApiKey,

    #[error("network error: {0}")]
    Transport(String),

    #[error("generation timed out")]
    Timeout,

    /// The provider's quota is exhausted; passed through as 429.
    #[error("provider rate limit exhausted")]
    RateLimited,

    #[error("provider returned http {status}: {body}")]
    Http { status: u16, body: String },

    /// The provider stream failed or ended without a completion marker.
    #[error("provider stream failed: {0}")]
    Stream(String),

    /// The provider returned unparseable or incomplete structured
    /// output. Surfaced distinctly so the caller can offer "try again".
    #[error("invalid AI response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    /// Map a reqwest transport error, distinguishing timeouts.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else {
            AiError::Transport(e.to_string())
        }
    }
}
