use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::models::DEFAULT_BASE_URL;
use crate::{Error, Result};
use reqwest::Client;

/// Lightweight Gemini REST client shared by the image, analysis, and search modules.
///
/// Requests use the transport's default timeout and are never retried.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.5-flash-image`);
    /// a `models/...` prefix is stripped.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls Gemini's `generateContent` endpoint.
    ///
    /// Connection failures, non-success statuses, and unparseable bodies all
    /// surface as [`Error::RemoteService`].
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!(
            "Sending generateContent request to Gemini (model: {}, parts: {}, tools: {})",
            self.model,
            request.contents.iter().map(|c| c.parts.len()).sum::<usize>(),
            request.tools.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::RemoteService {
                status: Some(status.as_u16()),
                message: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::remote(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::ai::gemini::types::Part;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_strips_models_prefix() {
        let client = GeminiHttpClient::new("key".to_string(), "models/gemini-x".to_string());
        assert_eq!(client.model(), "gemini-x");
    }

    #[tokio::test]
    async fn test_sends_api_key_header_to_model_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-x:generateContent"))
            .and(header("x-goog-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiHttpClient::new("secret".to_string(), "gemini-x".to_string())
            .with_base_url(format!("{}/", server.uri()));

        let response = client
            .generate_content(&GenerateContentRequest::new(vec![Part::text("hi")]))
            .await
            .unwrap();
        assert!(response.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_status_error_carries_status_and_body() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiHttpClient::new(String::new(), "gemini-x".to_string())
            .with_base_url(server.uri());

        let err = client
            .generate_content(&GenerateContentRequest::new(vec![Part::text("hi")]))
            .await
            .unwrap_err();

        match err {
            Error::RemoteService { status, message } => {
                assert_eq!(status, Some(403));
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_body_is_remote_service_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        let client = GeminiHttpClient::new("key".to_string(), "gemini-x".to_string())
            .with_base_url(server.uri());

        let err = client
            .generate_content(&GenerateContentRequest::new(vec![Part::text("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteService { status: None, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_remote_service_error() {
        let client = GeminiHttpClient::new("key".to_string(), "gemini-x".to_string())
            .with_base_url(test_support::unreachable_base_url());

        let err = client
            .generate_content(&GenerateContentRequest::new(vec![Part::text("hi")]))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
