use thiserror::Error;

/// Why a structured parse stage handed off to the next, more tolerant stage.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("JSON still invalid after repair: {0}")]
    Repair(#[source] serde_json::Error),

    #[error("parsed data is not an object")]
    NotAnObject,

    #[error("payload contains no slides")]
    EmptySlides,
}

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
