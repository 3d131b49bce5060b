//! Incremental decoder for chat-completion server-sent events.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Delta(String),
    Done,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw bytes and returns every event completed by them.
    /// Partial events stay buffered until their terminating blank line arrives.
    /// Carriage returns are dropped, so CRLF-framed streams decode like LF ones.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buf.extend(bytes.iter().copied().filter(|&b| b != b'\r'));
        let mut events = Vec::new();
        while let Some(pos) = memchr::memmem::find(&self.buf, b"\n\n") {
            let part: Vec<u8> = self.buf.drain(..pos + 2).collect();
            let Ok(text) = String::from_utf8(part) else {
                tracing::warn!("dropping non-utf8 sse event");
                continue;
            };
            for line in text.lines() {
                let line = line.trim_start();
                let Some(rest) = line.strip_prefix("data:") else {
                    continue;
                };
                let rest = rest.trim_start();
                if rest == "[DONE]" {
                    events.push(SseEvent::Done);
                    continue;
                }
                match serde_json::from_str::<serde_json::Value>(rest) {
                    Ok(v) => {
                        if let Some(delta) = v["choices"][0]["delta"]["content"].as_str() {
                            events.push(SseEvent::Delta(delta.to_string()));
                        }
                    }
                    Err(e) => tracing::warn!("sse json parse error: {e}"),
                }
            }
        }
        events
    }
}
