use anyhow::{anyhow, Result};
use carousel_common::PromptRequest;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::sse::{SseDecoder, SseEvent};

pub const DEFAULT_COMPLETION_ENDPOINT: &str = "http://127.0.0.1:8080/completion";
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const CHATML_STOP: &str = "<|im_end|>";

/// Wraps system and user prompts in the ChatML turn format instruction-tuned
/// local models expect, leaving the assistant turn open.
pub fn chatml_prompt(req: &PromptRequest) -> String {
    format!(
        "<|im_start|>system\n{}<|im_end|>\n<|im_start|>user\n{}<|im_end|>\n<|im_start|>assistant\n",
        req.system_prompt, req.user_prompt
    )
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    content: String,
}

/// Client for a llama.cpp-style `/completion` endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    n_predict: u32,
}

impl CompletionClient {
    pub fn new(endpoint: impl Into<String>, n_predict: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            n_predict,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request_body(&self, req: &PromptRequest) -> serde_json::Value {
        serde_json::json!({
            "prompt": chatml_prompt(req),
            "n_predict": self.n_predict,
            "temperature": req.temperature,
            "stop": [CHATML_STOP],
        })
    }

    pub async fn generate(&self, req: &PromptRequest) -> Result<String> {
        let body = self.request_body(req);
        tracing::debug!(endpoint = %self.endpoint, n_predict = self.n_predict, "sending completion request");

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow!(e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("completion server http {status}: {text}"));
        }

        let data: CompletionResponse = resp.json().await?;
        tracing::debug!(chars = data.content.len(), "completion received");
        Ok(data.content)
    }
}

/// Streaming client for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    pub model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_endpoint(api_key, model, DEFAULT_CHAT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(api_key: String, model: String, endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint,
            model,
        }
    }

    pub fn request_body(&self, req: &PromptRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": req.system_prompt},
                {"role": "user", "content": req.user_prompt},
            ],
            "temperature": req.temperature,
            "stream": true,
        })
    }

    /// Starts a streaming completion. The receiver yields content deltas and
    /// closes when the stream ends; a transport failure arrives as an `Err` item.
    pub async fn stream_chat(&self, req: &PromptRequest) -> Result<mpsc::Receiver<Result<String>>> {
        let body = self.request_body(req);
        tracing::debug!(model = %self.model, "sending chat completion request");

        let mut builder = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json");
        if let Ok(project) = std::env::var("OPENAI_PROJECT") {
            if !project.is_empty() {
                builder = builder.header("OpenAI-Project", project);
            }
        }
        if let Ok(org) = std::env::var("OPENAI_ORG") {
            if !org.is_empty() {
                builder = builder.header("OpenAI-Organization", org);
            }
        }
        let resp = builder.json(&body).send().await.map_err(|e| anyhow!(e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("openai http {status}: {text}"));
        }

        let (tx, rx) = mpsc::channel::<Result<String>>(64);
        tokio::spawn(forward_deltas(resp.bytes_stream(), tx));
        Ok(rx)
    }

    /// Runs a streaming completion to the end and returns the full text.
    pub async fn generate(&self, req: &PromptRequest) -> Result<String> {
        collect_deltas(self.stream_chat(req).await?).await
    }
}

/// Decodes SSE chunks and forwards content deltas. A transport error is
/// forwarded as the final item so the reader cannot mistake it for the end
/// of the reply.
async fn forward_deltas<S, B, E>(stream: S, tx: mpsc::Sender<Result<String>>)
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut decoder = SseDecoder::new();
    let mut stream = Box::pin(stream);
    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("stream chunk error: {e}");
                let _ = tx.send(Err(anyhow!("chat stream interrupted: {e}"))).await;
                return;
            }
        };
        for event in decoder.push(bytes.as_ref()) {
            match event {
                SseEvent::Delta(delta) => {
                    if tx.send(Ok(delta)).await.is_err() {
                        return;
                    }
                }
                SseEvent::Done => return,
            }
        }
    }
    tracing::debug!("chat stream finished");
}

async fn collect_deltas(mut rx: mpsc::Receiver<Result<String>>) -> Result<String> {
    let mut text = String::new();
    while let Some(delta) = rx.recv().await {
        text.push_str(&delta?);
    }
    Ok(text)
}
