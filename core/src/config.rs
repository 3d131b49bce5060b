use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CarouselError, Result};

const CONFIG_PATHS: [&str; 4] = [
    ".carousel/config.toml",
    ".carousel/config.json",
    "carousel.toml",
    "carousel.json",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// llama.cpp-compatible `/completion` server.
    #[default]
    Llama,
    /// OpenAI-compatible chat completions.
    Openai,
}

impl std::str::FromStr for Backend {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llama" | "llamacpp" | "llama.cpp" => Ok(Backend::Llama),
            "openai" => Ok(Backend::Openai),
            other => Err(CarouselError::Config(format!("unknown backend '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    /// Overrides the backend's default endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub default_slide_count: usize,
    pub default_tone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Llama,
            endpoint: None,
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            max_tokens: 512,
            temperature: 0.2,
            default_slide_count: 7,
            default_tone: "professional".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML or JSON file, chosen by extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        Ok(config)
    }

    /// First readable config file from the well-known locations, else defaults.
    pub fn load_with_fallback() -> Self {
        for path in CONFIG_PATHS {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {path}");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {path}: {e}");
                }
            }
        }
        tracing::debug!("Using default configuration");
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::load_with_fallback();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay environment overrides. Unparseable numeric values are ignored
    /// with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("CAROUSEL_BACKEND") {
            match backend.parse() {
                Ok(b) => self.backend = b,
                Err(e) => tracing::warn!("ignoring CAROUSEL_BACKEND: {e}"),
            }
        }
        if let Some(endpoint) = lookup("CAROUSEL_ENDPOINT").filter(|s| !s.is_empty()) {
            self.endpoint = Some(endpoint);
        }
        if let Some(model) = lookup("CAROUSEL_MODEL").filter(|s| !s.is_empty()) {
            self.model = model;
        }
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|s| !s.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(raw) = lookup("CAROUSEL_MAX_TOKENS") {
            match raw.trim().parse() {
                Ok(n) => self.max_tokens = n,
                Err(_) => tracing::warn!("ignoring CAROUSEL_MAX_TOKENS={raw}"),
            }
        }
        if let Some(raw) = lookup("CAROUSEL_TEMPERATURE") {
            match raw.trim().parse() {
                Ok(t) => self.temperature = t,
                Err(_) => tracing::warn!("ignoring CAROUSEL_TEMPERATURE={raw}"),
            }
        }
    }

    pub fn resolved_endpoint(&self) -> String {
        match (&self.endpoint, self.backend) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Backend::Llama) => carousel_llm::DEFAULT_COMPLETION_ENDPOINT.to_string(),
            (None, Backend::Openai) => carousel_llm::DEFAULT_CHAT_ENDPOINT.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CarouselError::Config(format!(
                "temperature {} outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.backend == Backend::Openai && self.api_key.is_none() {
            return Err(CarouselError::Config(
                "openai backend requires OPENAI_API_KEY or api_key".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_target_local_completion_server() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Llama);
        assert_eq!(config.resolved_endpoint(), "http://127.0.0.1:8080/completion");
        assert_eq!(config.max_tokens, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_apply_and_bad_numbers_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CAROUSEL_BACKEND", "openai"),
            ("CAROUSEL_MODEL", "gpt-4o"),
            ("OPENAI_API_KEY", "sk-test"),
            ("CAROUSEL_MAX_TOKENS", "lots"),
            ("CAROUSEL_TEMPERATURE", "0.7"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.backend, Backend::Openai);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.max_tokens, 512);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.resolved_endpoint(), carousel_llm::DEFAULT_CHAT_ENDPOINT);
    }

    #[test]
    fn openai_without_key_is_invalid() {
        let config = Config {
            backend: Backend::Openai,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CarouselError::Config(_))));
    }

    #[test]
    fn loads_partial_toml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("carousel.toml");
        std::fs::write(&toml_path, "max_tokens = 2048\nendpoint = \"http://gpu:9000/completion\"\n").unwrap();
        let config = Config::load_from_file(&toml_path).unwrap();
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.resolved_endpoint(), "http://gpu:9000/completion");
        assert_eq!(config.default_tone, "professional");

        let json_path = dir.path().join("carousel.json");
        std::fs::write(&json_path, r#"{"backend":"openai","temperature":1.0}"#).unwrap();
        let config = Config::load_from_file(&json_path).unwrap();
        assert_eq!(config.backend, Backend::Openai);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carousel.toml");
        std::fs::write(&path, "max_tokens = [").unwrap();
        assert!(matches!(Config::load_from_file(&path), Err(CarouselError::Toml(_))));
    }
}
