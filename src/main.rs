use anyhow::{Context, Result};
use asset_forge::media::{self, EncodedImage};
use asset_forge::models::{
    AspectRatio, Config, GenerationRequest, GroundingSource, BLUEPRINT_STYLES,
    DEFAULT_ASSET_QUERY, DEFAULT_OPTIMIZATION_CONTEXT, LEVEL_TYPES, TEXTURE_MATERIALS,
};
use asset_forge::studio::Studio;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "asset-forge")]
#[command(about = "AI tools for game asset creation")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add detail and sharpen an existing asset image.
    Enhance {
        #[arg(long)]
        input: PathBuf,
        /// Enhancement instruction; blank uses the default pass.
        #[arg(long, default_value = "")]
        style: String,
        #[arg(long)]
        output: PathBuf,
    },
    /// Generate a level blueprint (16:9).
    Blueprint {
        #[arg(long, default_value = LEVEL_TYPES[0])]
        level_type: String,
        /// Catalog theme, or "Custom Style..." together with --custom-theme.
        #[arg(long, default_value = BLUEPRINT_STYLES[0])]
        theme: String,
        #[arg(long)]
        custom_theme: Option<String>,
        #[arg(long)]
        output: PathBuf,
    },
    /// Generate a seamless square texture.
    Texture {
        #[arg(long, default_value = TEXTURE_MATERIALS[0])]
        material: String,
        #[arg(long)]
        output: PathBuf,
    },
    /// Convert a texture image into a normal map.
    NormalMap {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Get optimization feedback for a mesh screenshot.
    Optimize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_OPTIMIZATION_CONTEXT)]
        context: String,
    },
    /// Search for free Unity/Unreal assets.
    Assets {
        #[arg(default_value = DEFAULT_ASSET_QUERY)]
        query: String,
    },
    /// Generate an image from a raw prompt.
    Generate {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = "1:1", value_parser = parse_aspect_ratio_arg)]
        aspect_ratio: AspectRatio,
        #[arg(long)]
        output: PathBuf,
    },
}

fn parse_aspect_ratio_arg(input: &str) -> std::result::Result<AspectRatio, String> {
    input.parse()
}

fn load_image(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(media::encode(&bytes))
}

fn save_image(image: &EncodedImage, path: &Path) -> Result<()> {
    fs::write(path, image.to_bytes())
        .with_context(|| format!("Failed to write image {}", path.display()))?;
    info!("Saved {} image to {}", image.mime_type(), path.display());
    Ok(())
}

fn format_sources(sources: &[GroundingSource]) -> String {
    sources
        .iter()
        .map(|source| format!("{} - {}", source.title, source.uri))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn run(studio: &Studio, command: Command) -> Result<()> {
    match command {
        Command::Enhance {
            input,
            style,
            output,
        } => {
            let source = load_image(&input)?;
            let image = studio.enhance_asset(&source, &style).await?;
            save_image(&image, &output)?;
        }
        Command::Blueprint {
            level_type,
            theme,
            custom_theme,
            output,
        } => {
            let image = studio
                .generate_blueprint(&level_type, &theme, custom_theme.as_deref())
                .await?;
            save_image(&image, &output)?;
        }
        Command::Texture { material, output } => {
            let image = studio.generate_texture(&material).await?;
            save_image(&image, &output)?;
        }
        Command::NormalMap { input, output } => {
            let source = load_image(&input)?;
            let image = studio.generate_normal_map(&source).await?;
            save_image(&image, &output)?;
        }
        Command::Optimize { input, context } => {
            let source = load_image(&input)?;
            let analysis = studio.audit_model(&source, &context).await?;
            println!("{}", analysis);
        }
        Command::Assets { query } => {
            let result = studio.discover_assets(&query).await?;
            println!("{}", result.text);
            if !result.sources.is_empty() {
                println!("\nSources:\n{}", format_sources(&result.sources));
            }
        }
        Command::Generate {
            prompt,
            aspect_ratio,
            output,
        } => {
            let result = studio
                .execute(&GenerationRequest::generate(prompt, aspect_ratio))
                .await?;
            if let Some(image) = result.image() {
                save_image(image, &output)?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_forge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = Config::from_env();
    let studio = Studio::from_config(&config);

    match run(&studio, args.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Request failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
