//! JSON schema types for the generation backend payload.

use serde::Deserialize;

/// Top-level backend response: either `slides` or an `error`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub slides: Option<Vec<JsonSlide>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One generated slide.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSlide {
    /// `"title"` or `"content"`; anything else is treated as content.
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Option<JsonContent>,
    /// Image URL resolved by the backend (empty when none was found).
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub position: Option<JsonPositions>,
}

/// Slide body: a list of bullet points or a single string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonContent {
    Bullets(Vec<String>),
    Text(String),
}

/// Optional explicit placement per element.
#[derive(Debug, Default, Deserialize)]
pub struct JsonPositions {
    #[serde(default)]
    pub title: Option<JsonPoint>,
    #[serde(default)]
    pub subtitle: Option<JsonPoint>,
    #[serde(default)]
    pub content: Option<JsonPoint>,
    #[serde(default)]
    pub image: Option<JsonPoint>,
}

/// Percentage coordinates; either axis may be omitted.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct JsonPoint {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}
