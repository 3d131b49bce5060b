//! Carousel generation core: tolerant response parsing, template mapping,
//! prompts and the generation pipeline.

pub mod config;
pub mod error;
pub mod generation;
pub mod mapper;
pub mod parser;
pub mod prompts;

pub use config::{Backend, Config};
pub use error::{CarouselError, ParseError, Result};
pub use generation::{CarouselPipeline, GeneratedCarousel, TextGenerator};
pub use mapper::ContentMapper;
pub use parser::{ParseReport, ResponseParser, Tier};
