//! SSE frame decoding and the bounded relay pump.
//!
//! The provider sends `data: {json}` frames terminated by `data: [DONE]`.
//! Network chunks do not respect frame boundaries, so the decoder
//! buffers bytes and only emits complete lines. The relay pump moves
//! decoded fragments into a bounded channel consumed by the HTTP
//! response body: ordering is preserved, the capacity bound provides
//! backpressure, and a dropped consumer tears down the producer (which
//! in turn aborts the upstream provider request).

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::client::ChatStream;
use crate::error::AiError;

/// Capacity of the relay channel between the provider reader and the
/// response writer. Small: the point is pass-through, not buffering.
pub const RELAY_CHANNEL_CAPACITY: usize = 16;

/// One decoded server-sent event.
#[derive(Debug, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload (JSON text, undecoded).
    Data(String),
    /// The `data: [DONE]` completion marker.
    Done,
}

/// Incremental SSE line decoder.
///
/// Feed raw network chunks; complete `data:` lines come back as events.
/// Partial lines stay buffered until their terminating newline arrives,
/// so frames split across chunks are reassembled correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a network chunk, returning every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buf.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            // Non-data lines (comments, event names, blank keep-alives)
            // carry nothing we relay.
            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();

            if data == "[DONE]" {
                events.push(SseEvent::Done);
            } else if !data.is_empty() {
                events.push(SseEvent::Data(data.to_string()));
            }
        }
        events
    }
}

/// Spawn the relay pump: forward every fragment from `source` into a
/// bounded channel, in order, and return the consumer half.
///
/// The pump stops at the first error (after forwarding it) so an
/// upstream failure terminates the downstream stream with an error
/// signal rather than silently truncating. If the consumer disconnects,
/// `send` fails and the pump returns, dropping `source` and aborting
/// the provider request.
pub fn relay(source: ChatStream) -> ReceiverStream<Result<String, AiError>> {
    let (tx, rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut source = source;
        while let Some(item) = source.next().await {
            let is_err = item.is_err();
            if tx.send(item).await.is_err() {
                tracing::debug!("relay consumer disconnected, aborting provider stream");
                return;
            }
            if is_err {
                return;
            }
        }
    });

    ReceiverStream::new(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(items: Vec<Result<String, AiError>>) -> ChatStream {
        Box::pin(futures::stream::iter(items))
    }

    // -- SseDecoder ---------------------------------------------------------

    #[test]
    fn decodes_complete_frames() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"a\":1}\n\ndata: [DONE]\n\n");
        assert_eq!(
            events,
            vec![SseEvent::Data("{\"a\":1}".into()), SseEvent::Done]
        );
    }

    #[test]
    fn reassembles_frames_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"content\":").is_empty());
        let events = decoder.feed(b"\"hi\"}\n");
        assert_eq!(events, vec![SseEvent::Data("{\"content\":\"hi\"}".into())]);
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": keep-alive\n\nevent: ping\ndata: {}\n");
        assert_eq!(events, vec![SseEvent::Data("{}".into())]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"x\":2}\r\n");
        assert_eq!(events, vec![SseEvent::Data("{\"x\":2}".into())]);
    }

    // -- relay --------------------------------------------------------------

    #[tokio::test]
    async fn fragments_arrive_in_order_as_separate_items() {
        let source = fragments(vec![
            Ok("Hello".to_string()),
            Ok(" ".to_string()),
            Ok("world".to_string()),
        ]);

        let items: Vec<_> = relay(source).collect::<Vec<_>>().await;

        // Three separate writes, not one coalesced item.
        assert_eq!(items.len(), 3);
        let joined: String = items.into_iter().map(Result::unwrap).collect();
        assert_eq!(joined, "Hello world");
    }

    #[tokio::test]
    async fn upstream_error_terminates_the_stream_with_an_error() {
        let source = fragments(vec![
            Ok("partial".to_string()),
            Err(AiError::Stream("connection reset".into())),
            Ok("never delivered".to_string()),
        ]);

        let items: Vec<_> = relay(source).collect::<Vec<_>>().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().unwrap(), "partial");
        assert!(items[1].is_err(), "stream must end with an error signal");
    }

    #[tokio::test]
    async fn clean_completion_closes_the_channel() {
        let source = fragments(vec![Ok("done".to_string())]);
        let mut stream = relay(source);

        assert_eq!(stream.next().await.unwrap().unwrap(), "done");
        assert!(stream.next().await.is_none(), "channel closes after last fragment");
    }
}
