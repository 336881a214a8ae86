//! Panel orchestration: prompt assembly, input checks, and dispatch to the
//! AI services.

use crate::ai::{
    AssetSearchService, GeminiAnalysisClient, GeminiImageClient, GeminiSearchClient,
    ImageGenerationService, ModelAnalysisService,
};
use crate::media::EncodedImage;
use crate::models::{
    AspectRatio, AssetSearchResult, Config, GenerationRequest, GenerationResult, Operation,
    CUSTOM_STYLE,
};
use crate::{prompts, Error, Result};
use tracing::{info, warn};

/// Shown in place of an analysis the service returned without text.
pub const NO_ANALYSIS_PLACEHOLDER: &str = "No analysis provided.";

pub const BLUEPRINT_ASPECT_RATIO: AspectRatio = AspectRatio::Landscape;
pub const TEXTURE_ASPECT_RATIO: AspectRatio = AspectRatio::Square;

/// Holds one backend per capability. Calls are independent; nothing is
/// cached between them.
pub struct Studio {
    images: Box<dyn ImageGenerationService>,
    analysis: Box<dyn ModelAnalysisService>,
    search: Box<dyn AssetSearchService>,
}

/// Injectable service bundle used to construct [`Studio`] in tests/harnesses.
pub struct StudioServices {
    pub images: Box<dyn ImageGenerationService>,
    pub analysis: Box<dyn ModelAnalysisService>,
    pub search: Box<dyn AssetSearchService>,
}

impl Studio {
    pub fn with_services(services: StudioServices) -> Self {
        Self {
            images: services.images,
            analysis: services.analysis,
            search: services.search,
        }
    }

    /// Build Gemini-backed services from configuration.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Image model: {}", config.image_model);
        info!("Text model: {}", config.text_model);

        let images = GeminiImageClient::new_with_client(
            config.api_key.clone(),
            config.image_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.base_url.clone());

        let analysis = GeminiAnalysisClient::new_with_client(
            config.api_key.clone(),
            config.text_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.base_url.clone());

        let search = GeminiSearchClient::new_with_client(
            config.api_key.clone(),
            config.text_model.clone(),
            http_client,
        )
        .with_base_url(config.base_url.clone());

        Self::with_services(StudioServices {
            images: Box::new(images),
            analysis: Box::new(analysis),
            search: Box::new(search),
        })
    }

    /// Validate and run a single request.
    ///
    /// Request preconditions are checked here and nowhere else.
    pub async fn execute(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;

        if request.aspect_ratio.is_some() && request.operation != Operation::ImageGenerate {
            warn!("Ignoring aspect ratio for {:?}", request.operation);
        }
        if request.use_search_grounding && request.operation != Operation::GroundedSearch {
            warn!("Ignoring search grounding for {:?}", request.operation);
        }

        match request.operation {
            Operation::ImageGenerate => {
                let ratio = request.aspect_ratio.unwrap_or_default();
                let image = self
                    .images
                    .generate_image(&request.prompt_text, ratio)
                    .await?;
                Ok(GenerationResult::Image(image))
            }
            Operation::ImageEdit => {
                let source = request.required_source_image()?;
                let image = self.images.edit_image(source, &request.prompt_text).await?;
                Ok(GenerationResult::Image(image))
            }
            Operation::TextAnalyze => {
                let source = request.required_source_image()?;
                let text = self
                    .analysis
                    .analyze_model(source, &request.prompt_text)
                    .await?;
                Ok(GenerationResult::Text {
                    text,
                    sources: Vec::new(),
                })
            }
            Operation::GroundedSearch => {
                let result = self.search.find_free_assets(&request.prompt_text).await?;
                Ok(result.into())
            }
        }
    }

    async fn execute_image(&self, request: GenerationRequest) -> Result<EncodedImage> {
        match self.execute(&request).await? {
            GenerationResult::Image(image) => Ok(image),
            GenerationResult::Text { .. } => Err(Error::NoImagePayload),
        }
    }

    /// Asset enhancer: edit the uploaded asset with a style instruction
    /// (blank falls back to the default enhancement pass).
    pub async fn enhance_asset(
        &self,
        source_image: &str,
        style_instruction: &str,
    ) -> Result<EncodedImage> {
        let image = self
            .execute_image(GenerationRequest::edit(
                source_image,
                prompts::enhance(style_instruction),
            ))
            .await?;
        info!("Enhanced asset ({})", image.mime_type());
        Ok(image)
    }

    /// Level blueprint at 16:9. Selecting [`CUSTOM_STYLE`] requires
    /// non-blank `custom_style` text.
    pub async fn generate_blueprint(
        &self,
        level_type: &str,
        theme_style: &str,
        custom_style: Option<&str>,
    ) -> Result<EncodedImage> {
        if theme_style == CUSTOM_STYLE
            && prompts::resolve_theme(theme_style, custom_style).is_empty()
        {
            return Err(Error::Precondition(
                "custom theme text is required for 'Custom Style...'".to_string(),
            ));
        }

        let prompt = prompts::blueprint(level_type, theme_style, custom_style);
        let image = self
            .execute_image(GenerationRequest::generate(prompt, BLUEPRINT_ASPECT_RATIO))
            .await?;
        info!("Generated {} blueprint", level_type);
        Ok(image)
    }

    /// Seamless square texture for a material.
    pub async fn generate_texture(&self, material_type: &str) -> Result<EncodedImage> {
        let image = self
            .execute_image(GenerationRequest::generate(
                prompts::texture(material_type),
                TEXTURE_ASPECT_RATIO,
            ))
            .await?;
        info!("Generated {} texture", material_type);
        Ok(image)
    }

    /// Convert an uploaded texture into a normal map.
    pub async fn generate_normal_map(&self, source_image: &str) -> Result<EncodedImage> {
        let image = self
            .execute_image(GenerationRequest::edit(source_image, prompts::normal_map()))
            .await?;
        info!("Generated normal map");
        Ok(image)
    }

    /// Optimization audit. An empty analysis is replaced by
    /// [`NO_ANALYSIS_PLACEHOLDER`].
    pub async fn audit_model(&self, source_image: &str, target_context: &str) -> Result<String> {
        let result = self
            .execute(&GenerationRequest::analyze(source_image, target_context))
            .await?;

        let text = result.text().unwrap_or_default();
        if text.trim().is_empty() {
            Ok(NO_ANALYSIS_PLACEHOLDER.to_string())
        } else {
            info!("Model audit complete ({} chars)", text.len());
            Ok(text.to_string())
        }
    }

    /// Grounded free-asset search.
    pub async fn discover_assets(&self, query: &str) -> Result<AssetSearchResult> {
        match self
            .execute(&GenerationRequest::grounded_search(query))
            .await?
        {
            GenerationResult::Text { text, sources } => {
                info!("Found assets with {} sources", sources.len());
                Ok(AssetSearchResult { text, sources })
            }
            GenerationResult::Image(_) => Err(Error::NoTextPayload),
        }
    }
}
