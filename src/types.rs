//! Core types for image generation.

use crate::error::{NanoBananaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Aspect ratios accepted by the Gemini image config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 square aspect ratio.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 3:4 standard portrait aspect ratio.
    #[serde(rename = "3:4")]
    StandardPortrait,
    /// 4:3 standard landscape aspect ratio.
    #[serde(rename = "4:3")]
    Standard,
    /// 4:5 photo portrait aspect ratio.
    #[serde(rename = "4:5")]
    PhotoPortrait,
    /// 5:4 photo landscape aspect ratio.
    #[serde(rename = "5:4")]
    PhotoLandscape,
    /// 9:16 portrait (tall) aspect ratio.
    #[serde(rename = "9:16")]
    Portrait,
    /// 16:9 landscape (widescreen) aspect ratio.
    #[serde(rename = "16:9")]
    Landscape,
    /// 21:9 ultrawide aspect ratio.
    #[serde(rename = "21:9")]
    Ultrawide,
}

impl AspectRatio {
    /// Returns the aspect ratio as a string (e.g., "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::StandardPortrait => "3:4",
            Self::Standard => "4:3",
            Self::PhotoPortrait => "4:5",
            Self::PhotoLandscape => "5:4",
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
            Self::Ultrawide => "21:9",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an input image participates in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    /// The image itself is modified according to the prompt.
    Edit,
    /// The image only steers style/consistency; a new image is created.
    Reference,
}

/// An input image together with its role.
///
/// The role cannot exist without image bytes, so a request either carries a
/// complete edit/reference attachment or none at all.
#[derive(Debug, Clone)]
pub struct InputImage {
    /// Raw image bytes, sent verbatim as inline data.
    pub data: Vec<u8>,
    /// Whether the image is edited or used as a style reference.
    pub role: ImageRole,
}

impl InputImage {
    /// Loads an image from disk for the given role.
    ///
    /// A missing path is a fatal, user-facing condition reported before any
    /// request is made.
    pub fn load(path: impl AsRef<Path>, role: ImageRole) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NanoBananaError::InputNotFound {
                kind: "Image",
                path: path.to_path_buf(),
            });
        }
        let data = std::fs::read(path)?;
        Ok(Self { data, role })
    }

    /// Returns the MIME type detected from magic bytes, defaulting to PNG.
    pub fn mime_type(&self) -> &'static str {
        ImageFormat::from_magic_bytes(&self.data)
            .map(|f| f.mime_type())
            .unwrap_or("image/png")
    }
}

/// A request to generate a single image.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The fully composed text prompt.
    pub prompt: String,
    /// Requested width:height proportion.
    pub aspect_ratio: AspectRatio,
    /// Optional edit/reference image, sent before the prompt.
    pub input_image: Option<InputImage>,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: AspectRatio::default(),
            input_image: None,
        }
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Attaches an input image.
    pub fn with_input_image(mut self, image: InputImage) -> Self {
        self.input_image = Some(image);
        self
    }
}

/// A generated image with its data and format.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format.
    pub format: ImageFormat,
}

impl GeneratedImage {
    /// Creates a new generated image.
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self { data, format }
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Outcome of one generation call against the provider.
///
/// Provider responses are scanned image-first: the first inline image part
/// wins; failing that, any text parts become a diagnostic for the user.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// The response contained an image part.
    Image(GeneratedImage),
    /// No image part; the model returned text explaining itself.
    Text(String),
    /// Neither an image nor any text came back.
    Empty,
}
