//! # Generation Backend Client
//!
//! The AI backend is a black box: it receives `{text, numSlides}` and
//! answers with `{slides: [...]}` or `{error}`. [`SlideGenerator`] hides the
//! transport so the HTTP client can be replaced by a fake in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::deck::Deck;
use crate::error::{PresentifyError, Result};
use crate::ingest::GenerateResponse;

/// Default generation endpoint.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/generate_ppt_data";

/// Smallest slide count accepted by the backend.
pub const MIN_SLIDES: u32 = 1;
/// Largest slide count accepted by the backend.
pub const MAX_SLIDES: u32 = 50;

/// Body of the generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub text: String,
    pub num_slides: u32,
}

impl GenerateRequest {
    /// Validate the topic and clamp the slide count into `1..=50`.
    pub fn new(text: impl Into<String>, num_slides: u32) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PresentifyError::InvalidRequest(
                "presentation topic cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            text,
            num_slides: num_slides.clamp(MIN_SLIDES, MAX_SLIDES),
        })
    }

    /// Build from free-form slide-count input (`"12"`, `""`, `"abc"`).
    /// Unparseable input counts as one slide.
    pub fn from_input(text: impl Into<String>, num_slides: &str) -> Result<Self> {
        Self::new(text, parse_slide_count(num_slides))
    }
}

/// Parse a slide count the way the creation form does: leading digits,
/// falling back to 1, clamped into range.
pub fn parse_slide_count(input: &str) -> u32 {
    let digits: String = input
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(MIN_SLIDES)
        .clamp(MIN_SLIDES, MAX_SLIDES)
}

/// Source of generated slide payloads.
#[async_trait]
pub trait SlideGenerator: Send + Sync {
    /// Request slide content for a topic.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}

/// HTTP client for the generation backend.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("presentify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PresentifyError::Generation(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SlideGenerator for HttpGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        info!(
            endpoint = %self.endpoint,
            slides = request.num_slides,
            "requesting slide generation"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| PresentifyError::Generation(format!("request failed: {}", e)))?;

        // Error payloads arrive with non-2xx statuses; read the body either way.
        let status = response.status();
        let payload = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| PresentifyError::Generation(format!("unreadable response ({}): {}", status, e)))?;
        if !status.is_success() && payload.error.is_none() {
            return Err(PresentifyError::Generation(format!("backend returned {}", status)));
        }
        Ok(payload)
    }
}

/// Run one generation round-trip and normalize the result into a deck.
///
/// Nothing is retried; callers commit the deck only on success.
pub async fn generate_deck(generator: &dyn SlideGenerator, request: &GenerateRequest) -> Result<Deck> {
    let deck = generator.generate(request).await?.into_deck();
    match &deck {
        Ok(deck) => info!(slides = deck.len(), "generated deck"),
        Err(e) => warn!(error = %e, "generation failed"),
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::JsonSlide;

    struct Canned(fn() -> Result<GenerateResponse>);

    #[async_trait]
    impl SlideGenerator for Canned {
        async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateResponse> {
            (self.0)()
        }
    }

    #[test]
    fn test_request_wire_format() {
        let request = GenerateRequest::new("Rust", 3).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Rust", "numSlides": 3}));
    }

    #[test]
    fn test_request_validation() {
        assert!(GenerateRequest::new("   ", 3).is_err());
        assert_eq!(GenerateRequest::new("x", 0).unwrap().num_slides, 1);
        assert_eq!(GenerateRequest::new("x", 99).unwrap().num_slides, 50);
    }

    #[test]
    fn test_parse_slide_count() {
        assert_eq!(parse_slide_count("12"), 12);
        assert_eq!(parse_slide_count(""), 1);
        assert_eq!(parse_slide_count("abc"), 1);
        assert_eq!(parse_slide_count("0"), 1);
        assert_eq!(parse_slide_count("75"), 50);
        assert_eq!(parse_slide_count("7 slides"), 7);
    }

    #[tokio::test]
    async fn test_generate_deck_success() {
        let generator = Canned(|| {
            Ok(GenerateResponse {
                slides: Some(vec![JsonSlide {
                    layout: Some("title".into()),
                    title: Some("Hello".into()),
                    ..Default::default()
                }]),
                error: None,
            })
        });
        let request = GenerateRequest::new("hello", 1).unwrap();
        let deck = generate_deck(&generator, &request).await.unwrap();
        assert_eq!(deck.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_deck_backend_error() {
        let generator = Canned(|| {
            Ok(GenerateResponse {
                slides: None,
                error: Some("LLM failed".into()),
            })
        });
        let request = GenerateRequest::new("hello", 1).unwrap();
        let err = generate_deck(&generator, &request).await.unwrap_err();
        assert!(matches!(err, PresentifyError::Backend(_)));
    }

    #[tokio::test]
    async fn test_generate_deck_network_error() {
        let generator = Canned(|| Err(PresentifyError::Generation("connection refused".into())));
        let request = GenerateRequest::new("hello", 1).unwrap();
        let err = generate_deck(&generator, &request).await.unwrap_err();
        assert!(err.to_string().starts_with(crate::error::GENERATION_FAILED_NOTICE));
    }
}
