use super::{AssetSearchService, ImageGenerationService, ModelAnalysisService};
use crate::media::EncodedImage;
use crate::models::{AspectRatio, AssetSearchResult};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A call received by [`MockGenerativeClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GenerateImage {
        prompt: String,
        aspect_ratio: AspectRatio,
    },
    EditImage {
        source_image: String,
        prompt: String,
    },
    AnalyzeModel {
        source_image: String,
        context: String,
    },
    FindFreeAssets {
        query: String,
    },
}

/// In-memory stand-in for every AI capability.
///
/// Clones share state, so one instance can back all three studio services
/// and still report a single call log.
#[derive(Clone)]
pub struct MockGenerativeClient {
    image_response: Arc<Mutex<Option<EncodedImage>>>,
    analysis_response: Arc<Mutex<String>>,
    search_response: Arc<Mutex<Option<AssetSearchResult>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self {
            image_response: Arc::new(Mutex::new(None)),
            analysis_response: Arc::new(Mutex::new("Mock analysis".to_string())),
            search_response: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, image: EncodedImage) -> Self {
        *self.image_response.lock().unwrap() = Some(image);
        self
    }

    pub fn with_analysis_response(self, text: String) -> Self {
        *self.analysis_response.lock().unwrap() = text;
        self
    }

    pub fn with_search_response(self, result: AssetSearchResult) -> Self {
        *self.search_response.lock().unwrap() = Some(result);
        self
    }

    /// Make every call fail as a transport error with `message`.
    pub fn with_remote_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(Error::remote(message.clone())),
            None => Ok(()),
        }
    }

    fn image(&self) -> EncodedImage {
        self.image_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| {
                // 1x1 PNG
                EncodedImage::with_mime(
                    "image/png",
                    &[
                        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
                        0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
                        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00,
                        0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00,
                        0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25, 0x00, 0xBC, 0x00, 0x00, 0x00,
                        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
                    ],
                )
            })
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockGenerativeClient {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<EncodedImage> {
        self.record(RecordedCall::GenerateImage {
            prompt: prompt.to_string(),
            aspect_ratio,
        })?;
        Ok(self.image())
    }

    async fn edit_image(&self, source_image: &str, prompt: &str) -> Result<EncodedImage> {
        self.record(RecordedCall::EditImage {
            source_image: source_image.to_string(),
            prompt: prompt.to_string(),
        })?;
        Ok(self.image())
    }
}

#[async_trait]
impl ModelAnalysisService for MockGenerativeClient {
    async fn analyze_model(&self, source_image: &str, context: &str) -> Result<String> {
        self.record(RecordedCall::AnalyzeModel {
            source_image: source_image.to_string(),
            context: context.to_string(),
        })?;
        Ok(self.analysis_response.lock().unwrap().clone())
    }
}

#[async_trait]
impl AssetSearchService for MockGenerativeClient {
    async fn find_free_assets(&self, query: &str) -> Result<AssetSearchResult> {
        self.record(RecordedCall::FindFreeAssets {
            query: query.to_string(),
        })?;
        Ok(self
            .search_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| AssetSearchResult {
                text: format!("Mock assets for {}", query),
                sources: Vec::new(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_image_is_png() {
        let client = MockGenerativeClient::new();
        let image = client
            .generate_image("texture", AspectRatio::Square)
            .await
            .unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(&image.to_bytes()[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[tokio::test]
    async fn test_mock_clones_share_call_log() {
        let client = MockGenerativeClient::new();
        let other = client.clone();

        client.find_free_assets("skybox").await.unwrap();
        other.analyze_model("data:image/png;base64,AA==", "mobile").await.unwrap();

        assert_eq!(client.get_call_count(), 2);
        assert_eq!(
            other.recorded_calls()[0],
            RecordedCall::FindFreeAssets {
                query: "skybox".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_mock_remote_failure_still_records_call() {
        let client = MockGenerativeClient::new().with_remote_failure("offline".to_string());

        let err = client.edit_image("data:image/png;base64,AA==", "x").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(client.get_call_count(), 1);
    }
}
