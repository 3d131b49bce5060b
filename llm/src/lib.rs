//! Text generation backends for carousel content.

pub mod client;
pub mod sse;

pub use client::{
    chatml_prompt, CompletionClient, OpenAiChatClient, DEFAULT_CHAT_ENDPOINT,
    DEFAULT_COMPLETION_ENDPOINT,
};
