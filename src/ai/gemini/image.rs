use super::client::GeminiHttpClient;
use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};
use crate::ai::ImageGenerationService;
use crate::media::EncodedImage;
use crate::models::AspectRatio;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    /// First inline payload in part order; an intact response without one is
    /// [`Error::NoImagePayload`].
    fn extract_image(response: &GenerateContentResponse) -> Result<EncodedImage> {
        let inline = response.first_inline_data().ok_or_else(|| {
            tracing::error!("Gemini response contained no image part");
            Error::NoImagePayload
        })?;

        tracing::debug!("Gemini returned image with mime_type: {}", inline.mime_type);

        EncodedImage::from_base64(inline.mime_type.clone(), inline.data.clone())
            .map_err(|e| Error::remote(format!("Failed to decode Gemini image payload: {}", e)))
    }
}

super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<EncodedImage> {
        tracing::debug!(
            "Generating image via Gemini (model: {}, aspect ratio: {})",
            self.http.model(),
            aspect_ratio
        );

        let mut request = GenerateContentRequest::new(vec![Part::text(prompt)]);
        request.generation_config = Some(GenerationConfig {
            image_config: Some(ImageConfig { aspect_ratio }),
        });

        let response = self.http.generate_content(&request).await?;
        Self::extract_image(&response)
    }

    async fn edit_image(&self, source_image: &str, prompt: &str) -> Result<EncodedImage> {
        let source = EncodedImage::parse(source_image)?;

        tracing::debug!(
            "Editing {} image via Gemini (model: {})",
            source.mime_type(),
            self.http.model()
        );

        // Source first, instruction second.
        let request = GenerateContentRequest::new(vec![Part::image(&source), Part::text(prompt)]);

        let response = self.http.generate_content(&request).await?;
        Self::extract_image(&response)
    }
}
