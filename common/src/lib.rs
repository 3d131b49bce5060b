//! Shared data model for generated carousel content.

pub mod types;

pub use types::{limits, GenerationRequest, Payload, PromptRequest, SlideContent, SlideType};
