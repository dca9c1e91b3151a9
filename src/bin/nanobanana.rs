//! CLI for Nano Banana - image generation via Google's Gemini API.

use clap::{Parser, ValueEnum};
use nanobanana::batch::{self, BatchRequest};
use nanobanana::prompt::StyleTemplate;
use nanobanana::{
    AspectRatio, Config, GeminiClient, GeminiModel, ImageRole, InputImage, NanoBananaError,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nanobanana")]
#[command(about = "Generate and edit images using Google's Gemini API")]
#[command(version)]
struct Cli {
    /// Output file path (e.g., output.png)
    output: PathBuf,

    /// Image prompt(s); each one issues its own request
    #[arg(required = true)]
    prompts: Vec<String>,

    /// Style markdown file path
    #[arg(long)]
    style: Option<PathBuf>,

    /// Input image to edit
    #[arg(long)]
    edit: Option<PathBuf>,

    /// Reference image for style consistency
    #[arg(long = "ref")]
    reference: Option<PathBuf>,

    /// Aspect ratio
    #[arg(long, value_enum, default_value = "1:1")]
    aspect: AspectRatioArg,

    /// Image model to use
    #[arg(long, value_enum, default_value = "gemini-3-pro-image-preview")]
    model: GeminiModelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AspectRatioArg {
    #[value(name = "1:1")]
    Square,
    #[value(name = "3:4")]
    StandardPortrait,
    #[value(name = "4:3")]
    Standard,
    #[value(name = "4:5")]
    PhotoPortrait,
    #[value(name = "5:4")]
    PhotoLandscape,
    #[value(name = "9:16")]
    Portrait,
    #[value(name = "16:9")]
    Landscape,
    #[value(name = "21:9")]
    Ultrawide,
}

impl From<AspectRatioArg> for AspectRatio {
    fn from(arg: AspectRatioArg) -> Self {
        match arg {
            AspectRatioArg::Square => AspectRatio::Square,
            AspectRatioArg::StandardPortrait => AspectRatio::StandardPortrait,
            AspectRatioArg::Standard => AspectRatio::Standard,
            AspectRatioArg::PhotoPortrait => AspectRatio::PhotoPortrait,
            AspectRatioArg::PhotoLandscape => AspectRatio::PhotoLandscape,
            AspectRatioArg::Portrait => AspectRatio::Portrait,
            AspectRatioArg::Landscape => AspectRatio::Landscape,
            AspectRatioArg::Ultrawide => AspectRatio::Ultrawide,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GeminiModelArg {
    #[value(name = "gemini-3-pro-image-preview")]
    Gemini3ProImage,
    #[value(name = "gemini-2.5-flash-image")]
    Gemini25FlashImage,
    #[value(name = "imagen-4.0-generate-001")]
    Imagen4,
}

impl From<GeminiModelArg> for GeminiModel {
    fn from(arg: GeminiModelArg) -> Self {
        match arg {
            GeminiModelArg::Gemini3ProImage => GeminiModel::Gemini3ProImage,
            GeminiModelArg::Gemini25FlashImage => GeminiModel::Gemini25FlashImage,
            GeminiModelArg::Imagen4 => GeminiModel::Imagen4,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        if matches!(err, NanoBananaError::MissingApiKey) {
            eprintln!("Set it with: export GOOGLE_API_KEY='your-api-key'");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> nanobanana::Result<()> {
    let style = match &cli.style {
        Some(path) => {
            let style = StyleTemplate::load(path)?;
            println!("Using style: {}", path.display());
            Some(style)
        }
        None => None,
    };

    // --edit wins over --ref when both are given
    let input_image = if let Some(path) = &cli.edit {
        let image = InputImage::load(path, ImageRole::Edit)?;
        println!("Editing image: {}", path.display());
        Some(image)
    } else if let Some(path) = &cli.reference {
        let image = InputImage::load(path, ImageRole::Reference)?;
        println!("Using reference: {}", path.display());
        Some(image)
    } else {
        None
    };

    let config = Config::from_env()?;
    let client = GeminiClient::builder()
        .api_key(config.api_key())
        .model(cli.model.into())
        .build()?;

    let batch = BatchRequest {
        output: cli.output,
        prompts: cli.prompts,
        style,
        input_image,
        aspect_ratio: cli.aspect.into(),
    };

    // Per-prompt failures are reported inside the loop; the process still
    // exits 0 so a partially successful batch keeps its outputs usable.
    batch::run(&client, &batch).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["nanobanana", "out.png", "a cube"]);
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(cli.prompts, vec!["a cube"]);
        assert!(matches!(cli.aspect, AspectRatioArg::Square));
        assert!(matches!(cli.model, GeminiModelArg::Gemini3ProImage));
    }

    #[test]
    fn test_multiple_prompts_and_flags() {
        let cli = Cli::parse_from([
            "nanobanana",
            "out.png",
            "cube",
            "sphere",
            "--aspect",
            "16:9",
            "--model",
            "gemini-2.5-flash-image",
            "--ref",
            "style.png",
        ]);
        assert_eq!(cli.prompts, vec!["cube", "sphere"]);
        assert!(matches!(cli.aspect, AspectRatioArg::Landscape));
        assert!(matches!(cli.model, GeminiModelArg::Gemini25FlashImage));
        assert_eq!(cli.reference, Some(PathBuf::from("style.png")));
    }

    #[test]
    fn test_prompts_are_required() {
        assert!(Cli::try_parse_from(["nanobanana", "out.png"]).is_err());
    }

    #[test]
    fn test_invalid_aspect_is_rejected() {
        let result = Cli::try_parse_from(["nanobanana", "out.png", "cube", "--aspect", "2:1"]);
        assert!(result.is_err());
    }
}
