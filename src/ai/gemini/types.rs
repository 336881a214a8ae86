//! Shared Gemini payload types used across image, analysis, and search modules.

use crate::media::EncodedImage;
use crate::models::{AspectRatio, GroundingSource};
use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding. Parts of any
/// other kind (function calls, code execution) land in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            thought: None,
        }
    }

    pub fn image(image: &EncodedImage) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type().to_string(),
                data: image.base64_data().to_string(),
            },
        }
    }
}

/// Base64 inline payload used for image/vision requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Body of a `generateContent` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content::user(parts)],
            generation_config: None,
            tools: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct GoogleSearch {}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GenerateContentResponse {
    fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// First inline payload of the first candidate, in part order.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts().iter().find_map(|p| match p {
            Part::InlineData { inline_data } => Some(inline_data),
            Part::Text { .. } | Part::Other(_) => None,
        })
    }

    /// Concatenated non-thought text of the first candidate, or `None`
    /// when it has no text parts at all.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .parts()
            .iter()
            .filter_map(|p| match p {
                Part::Text { text, thought } if *thought != Some(true) => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// Web citations of the first candidate; empty without grounding metadata.
    pub fn grounding_sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        let uri = web.uri.clone()?;
                        let title = web.title.clone().unwrap_or_else(|| uri.clone());
                        Some(GroundingSource { title, uri })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_inline_data_skips_leading_text() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your texture" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "BBBB" } }
                    ]
                }
            }]
        }));

        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "AAAA");
    }

    #[test]
    fn test_unknown_parts_do_not_break_parsing() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "functionCall": { "name": "lookup", "args": {} } },
                        { "text": "done" }
                    ]
                }
            }]
        }));

        assert!(response.first_inline_data().is_none());
        assert_eq!(response.text().as_deref(), Some("done"));
    }

    #[test]
    fn test_text_concatenates_and_skips_thoughts() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "Reduce " },
                        { "text": "draw calls." }
                    ]
                }
            }]
        }));

        assert_eq!(response.text().as_deref(), Some("Reduce draw calls."));
    }

    #[test]
    fn test_missing_candidates_and_content() {
        assert!(parse(json!({})).text().is_none());
        assert!(parse(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
            .first_inline_data()
            .is_none());
    }

    #[test]
    fn test_grounding_sources_in_order() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "results" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://itch.io/a", "title": "itch.io" } },
                        { "retrievedContext": { "uri": "ignored" } },
                        { "web": { "uri": "https://assetstore.unity.com/b" } },
                        { "web": { "title": "no uri" } }
                    ]
                }
            }]
        }));

        assert_eq!(
            response.grounding_sources(),
            vec![
                GroundingSource {
                    title: "itch.io".to_string(),
                    uri: "https://itch.io/a".to_string(),
                },
                GroundingSource {
                    title: "https://assetstore.unity.com/b".to_string(),
                    uri: "https://assetstore.unity.com/b".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_grounding_sources_absent_metadata() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "results" }] } }]
        }));
        assert!(response.grounding_sources().is_empty());
    }

    #[test]
    fn test_request_serialization_shape() {
        let mut request = GenerateContentRequest::new(vec![Part::text("hello")]);
        request.generation_config = Some(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: AspectRatio::Landscape,
            }),
        });
        request.tools.push(Tool::google_search());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } },
                "tools": [{ "googleSearch": {} }]
            })
        );
    }
}
