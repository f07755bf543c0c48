//! HTTP client for the OpenAI-compatible chat-completion provider.

use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, Endpoint};
use crate::error::AiError;
use crate::stream::{SseDecoder, SseEvent};

/// Sampling temperature used for every generation request.
const TEMPERATURE: f32 = 0.7;

/// A stream of text fragments from the provider, in arrival order.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<String, AiError>> + Send>>;

/// Chat-completion client for a single provider account.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: reqwest::Client,
    config: AiConfig,
}

/// One message turn in a chat-completion request.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

/// Non-streaming response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// One SSE frame of a streaming response.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

impl AiClient {
    /// Build a client from the given configuration.
    ///
    /// The reqwest timeout covers the whole call including body reads,
    /// so it doubles as the generation timeout for streamed responses.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("devdocs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Build a client from environment variables.
    pub fn from_env() -> Result<Self, AiError> {
        Self::new(AiConfig::from_env()?)
    }

    fn chat_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url(endpoint).trim_end_matches('/')
        )
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        system: &str,
        user: &str,
        stream: bool,
    ) -> Result<reqwest::Response, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: TEMPERATURE,
            stream,
        };

        let response = self
            .http
            .post(self.chat_url(endpoint))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(AiError::from_reqwest)?;

        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(AiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(AiError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(AiError::Http { status, body })
            }
        }
    }

    /// Send a non-streaming completion and return the full text.
    pub async fn chat(
        &self,
        endpoint: Endpoint,
        system: &str,
        user: &str,
    ) -> Result<String, AiError> {
        let response = self.send(endpoint, system, user, false).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::InvalidResponse("no text content in response".into()))
    }

    /// Send a streaming completion and return the fragment stream.
    ///
    /// Fragments are yielded in arrival order, one per non-empty delta.
    /// A provider failure mid-stream (or an end-of-stream without the
    /// `[DONE]` marker) yields a final `Err` so the consumer can tell an
    /// abrupt end from a clean completion. Dropping the stream aborts
    /// the underlying request, releasing the provider connection.
    pub async fn chat_stream(
        &self,
        endpoint: Endpoint,
        system: &str,
        user: &str,
    ) -> Result<ChatStream, AiError> {
        let response = self.send(endpoint, system, user, true).await?;

        let body = response
            .bytes_stream()
            .map(|item| item.map(|bytes| bytes.to_vec()))
            .boxed();

        struct State {
            body: futures::stream::BoxStream<'static, Result<Vec<u8>, reqwest::Error>>,
            decoder: SseDecoder,
            pending: std::collections::VecDeque<String>,
            finished: bool,
            saw_done: bool,
        }

        let state = State {
            body,
            decoder: SseDecoder::new(),
            pending: std::collections::VecDeque::new(),
            finished: false,
            saw_done: false,
        };

        let stream = futures::stream::unfold(state, |mut st| async move {
            loop {
                if let Some(fragment) = st.pending.pop_front() {
                    return Some((Ok(fragment), st));
                }
                if st.finished {
                    return None;
                }

                match st.body.next().await {
                    None => {
                        st.finished = true;
                        if st.saw_done {
                            return None;
                        }
                        return Some((
                            Err(AiError::Stream(
                                "provider stream ended without completion marker".into(),
                            )),
                            st,
                        ));
                    }
                    Some(Err(e)) => {
                        st.finished = true;
                        return Some((Err(AiError::Stream(e.to_string())), st));
                    }
                    Some(Ok(chunk)) => {
                        for event in st.decoder.feed(&chunk) {
                            match event {
                                SseEvent::Done => {
                                    st.saw_done = true;
                                    st.finished = true;
                                }
                                SseEvent::Data(data) => match parse_stream_fragment(&data) {
                                    Ok(Some(text)) => st.pending.push_back(text),
                                    Ok(None) => {}
                                    Err(e) => {
                                        st.finished = true;
                                        st.pending.clear();
                                        return Some((Err(e), st));
                                    }
                                },
                            }
                        }
                    }
                }
            }
        });

        Ok(stream.boxed())
    }
}

/// Extract the delta text from one SSE data frame, if any.
fn parse_stream_fragment(data: &str) -> Result<Option<String>, AiError> {
    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| AiError::Stream(format!("malformed stream frame: {e}")))?;

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|s| !s.is_empty()))
}
