use async_trait::async_trait;
use carousel_common::{GenerationRequest, Payload, PromptRequest};
use carousel_llm::{CompletionClient, OpenAiChatClient};
use carousel_protocol::Project;

use crate::config::{Backend, Config};
use crate::error::{CarouselError, Result};
use crate::mapper::ContentMapper;
use crate::parser::{ResponseParser, Tier};
use crate::prompts;

/// A backend that turns a prompt into raw model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &PromptRequest) -> anyhow::Result<String>;
}

#[async_trait]
impl TextGenerator for CompletionClient {
    async fn generate(&self, request: &PromptRequest) -> anyhow::Result<String> {
        CompletionClient::generate(self, request).await
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatClient {
    async fn generate(&self, request: &PromptRequest) -> anyhow::Result<String> {
        OpenAiChatClient::generate(self, request).await
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedCarousel {
    pub raw: String,
    pub payload: Payload,
    pub project: Project,
    pub tier: Tier,
}

/// Prompt, generate, parse, map.
pub struct CarouselPipeline {
    generator: Box<dyn TextGenerator>,
    temperature: f32,
}

impl CarouselPipeline {
    pub fn new(generator: Box<dyn TextGenerator>, temperature: f32) -> Self {
        Self { generator, temperature }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let endpoint = config.resolved_endpoint();
        let generator: Box<dyn TextGenerator> = match config.backend {
            Backend::Llama => Box::new(CompletionClient::new(endpoint, config.max_tokens)),
            Backend::Openai => {
                let api_key = config
                    .api_key
                    .clone()
                    .ok_or_else(|| CarouselError::Config("openai backend requires an API key".into()))?;
                Box::new(OpenAiChatClient::with_endpoint(api_key, config.model.clone(), endpoint))
            }
        };
        tracing::info!(backend = ?config.backend, "generation backend ready");
        Ok(Self::new(generator, config.temperature))
    }

    pub fn prompt_for(&self, request: &GenerationRequest) -> PromptRequest {
        PromptRequest {
            system_prompt: prompts::system_prompt(),
            user_prompt: prompts::build_user_prompt(request),
            temperature: self.temperature,
        }
    }

    /// Only the backend call can fail; whatever text comes back yields a carousel.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedCarousel> {
        let prompt = self.prompt_for(request);
        tracing::info!(topic = %request.topic, count = request.count, "generating carousel");

        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| CarouselError::Generation(format!("{e:#}")))?;

        let report = ResponseParser::parse_with_report(&raw);
        if report.payload.slides.len() != request.count {
            tracing::warn!(
                requested = request.count,
                received = report.payload.slides.len(),
                "slide count differs from request"
            );
        }
        let project = ContentMapper::create_project_from_ai(&report.payload);
        Ok(GeneratedCarousel {
            raw,
            payload: report.payload,
            project,
            tier: report.tier,
        })
    }
}
