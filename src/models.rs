//! Data models and structures
//!
//! Request/result types shared by the studio and the AI services, the
//! panel catalogs, and configuration.

use crate::media::EncodedImage;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog entry that selects the caller's free-text theme.
pub const CUSTOM_STYLE: &str = "Custom Style...";

pub const BLUEPRINT_STYLES: &[&str] = &[
    "Fantasy / Medieval RPG",
    "Sci-Fi / Space Station",
    "Cyberpunk / Future City",
    "Post-Apocalyptic / Wasteland",
    "Horror / Haunted Mansion",
    "Wild West / Frontier Town",
    "Noir / 1940s Detective",
    "Steampunk / Victorian Engine",
    "Modern Urban / City Block",
    "Military / Tactical Base",
    "Stylized / Cartoon World",
    "Retro Pixel Art Style",
    "Lovecraftian / Eldritch Space",
    "Ancient Egypt / Desert Tomb",
    "Underwater / Rapture Style",
    "Industrial / Factory Zone",
    "Platformer / Neon Level",
    CUSTOM_STYLE,
];

pub const LEVEL_TYPES: &[&str] = &[
    "Top-down Blueprint",
    "Level Layout Sketch",
    "Orthographic Reference",
    "Isometric Map",
];

pub const TEXTURE_MATERIALS: &[&str] = &[
    "Cracked Dry Earth",
    "Medieval Cobblestone",
    "Rusty Metal Grate",
    "Lush Stylized Grass",
    "Snowy Rocky Terrain",
    "Sci-fi Circuit Floor",
];

pub const DEFAULT_OPTIMIZATION_CONTEXT: &str = "Mobile RPG environment asset";
pub const DEFAULT_ASSET_QUERY: &str = "Fantasy environment assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "3:4")]
    ThreeFour,
    #[serde(rename = "4:3")]
    FourThree,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::ThreeFour,
        AspectRatio::FourThree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::FourThree => "4:3",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "Invalid aspect ratio '{}'. Expected one of: 1:1, 16:9, 9:16, 3:4, 4:3",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ImageGenerate,
    ImageEdit,
    TextAnalyze,
    GroundedSearch,
}

impl Operation {
    pub fn requires_source_image(&self) -> bool {
        matches!(self, Operation::ImageEdit | Operation::TextAnalyze)
    }
}

/// One user action's worth of input.
///
/// `prompt_text` is the full instruction for image operations, the target
/// context for [`Operation::TextAnalyze`], and the search query for
/// [`Operation::GroundedSearch`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub operation: Operation,
    pub prompt_text: String,
    pub source_image: Option<String>,
    pub aspect_ratio: Option<AspectRatio>,
    pub use_search_grounding: bool,
}

impl GenerationRequest {
    pub fn generate(prompt_text: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            operation: Operation::ImageGenerate,
            prompt_text: prompt_text.into(),
            source_image: None,
            aspect_ratio: Some(aspect_ratio),
            use_search_grounding: false,
        }
    }

    pub fn edit(source_image: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            operation: Operation::ImageEdit,
            prompt_text: prompt_text.into(),
            source_image: Some(source_image.into()),
            aspect_ratio: None,
            use_search_grounding: false,
        }
    }

    pub fn analyze(source_image: impl Into<String>, context_text: impl Into<String>) -> Self {
        Self {
            operation: Operation::TextAnalyze,
            prompt_text: context_text.into(),
            source_image: Some(source_image.into()),
            aspect_ratio: None,
            use_search_grounding: false,
        }
    }

    pub fn grounded_search(query: impl Into<String>) -> Self {
        Self {
            operation: Operation::GroundedSearch,
            prompt_text: query.into(),
            source_image: None,
            aspect_ratio: None,
            use_search_grounding: true,
        }
    }

    /// The source image, for operations that need one.
    pub fn required_source_image(&self) -> Result<&str> {
        self.source_image.as_deref().ok_or_else(|| {
            Error::Precondition(format!("{:?} requires a source image", self.operation))
        })
    }

    /// Check the operation has the prompt text it needs. The source image
    /// is checked by [`Self::required_source_image`] at the point of use.
    pub fn validate(&self) -> Result<()> {
        let needs_prompt = !matches!(self.operation, Operation::TextAnalyze);
        if needs_prompt && self.prompt_text.trim().is_empty() {
            return Err(Error::Precondition(format!(
                "{:?} requires a non-empty prompt",
                self.operation
            )));
        }

        Ok(())
    }
}

/// A search citation attached to a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSearchResult {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Image,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Image(EncodedImage),
    Text {
        text: String,
        sources: Vec<GroundingSource>,
    },
}

impl GenerationResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            GenerationResult::Image(_) => ResultKind::Image,
            GenerationResult::Text { .. } => ResultKind::Text,
        }
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        match self {
            GenerationResult::Image(image) => Some(image),
            GenerationResult::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationResult::Text { text, .. } => Some(text),
            GenerationResult::Image(_) => None,
        }
    }

    pub fn sources(&self) -> &[GroundingSource] {
        match self {
            GenerationResult::Text { sources, .. } => sources,
            GenerationResult::Image(_) => &[],
        }
    }
}

impl From<AssetSearchResult> for GenerationResult {
    fn from(result: AssetSearchResult) -> Self {
        GenerationResult::Text {
            text: result.text,
            sources: result.sources,
        }
    }
}

// Configuration
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub image_model: String,
    pub text_model: String,
    pub base_url: String,
}

impl Config {
    /// Read configuration from the environment, loading `.env` first.
    ///
    /// A missing credential is not an error here; the service rejects the
    /// first call instead.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("API_KEY")
            .or_else(|| non_empty("GEMINI_API_KEY"))
            .unwrap_or_else(|| {
                tracing::warn!("API_KEY not set; requests will be rejected by the service");
                String::new()
            });

        Self {
            api_key,
            image_model: non_empty("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            text_model: non_empty("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}
