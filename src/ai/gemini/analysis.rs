use super::client::GeminiHttpClient;
use super::types::{GenerateContentRequest, Part};
use crate::ai::ModelAnalysisService;
use crate::media::EncodedImage;
use crate::{prompts, Result};
use async_trait::async_trait;

pub struct GeminiAnalysisClient {
    http: GeminiHttpClient,
}

impl GeminiAnalysisClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }
}

super::impl_with_gemini_base_url!(GeminiAnalysisClient);

#[async_trait]
impl ModelAnalysisService for GeminiAnalysisClient {
    async fn analyze_model(&self, source_image: &str, context: &str) -> Result<String> {
        let source = EncodedImage::parse(source_image)?;

        tracing::debug!(
            "Analyzing model screenshot ({}) via Gemini (model: {})",
            source.mime_type(),
            self.http.model()
        );

        let request = GenerateContentRequest::new(vec![
            Part::image(&source),
            Part::text(prompts::optimization(context)),
        ]);

        let response = self.http.generate_content(&request).await?;

        let text = response.text().unwrap_or_default();
        if text.is_empty() {
            tracing::warn!("Gemini analysis response contained no text");
        }
        Ok(text)
    }
}
