use super::client::GeminiHttpClient;
use super::types::{GenerateContentRequest, Part, Tool};
use crate::ai::AssetSearchService;
use crate::models::AssetSearchResult;
use crate::{prompts, Error, Result};
use async_trait::async_trait;

/// Asset discovery backed by Gemini with Google Search grounding.
pub struct GeminiSearchClient {
    http: GeminiHttpClient,
}

impl GeminiSearchClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }
}

super::impl_with_gemini_base_url!(GeminiSearchClient);

#[async_trait]
impl AssetSearchService for GeminiSearchClient {
    async fn find_free_assets(&self, query: &str) -> Result<AssetSearchResult> {
        tracing::debug!(
            "Searching free assets via Gemini (model: {}): {}",
            self.http.model(),
            query
        );

        let mut request = GenerateContentRequest::new(vec![Part::text(prompts::asset_search(query))]);
        request.tools.push(Tool::google_search());

        let response = self.http.generate_content(&request).await?;

        // Text and sources come back together or not at all.
        let text = response
            .text()
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::NoTextPayload)?;
        let sources = response.grounding_sources();

        tracing::info!("Asset search returned {} grounding sources", sources.len());

        Ok(AssetSearchResult { text, sources })
    }
}
