#![warn(missing_docs)]
//! Nano Banana - image generation and editing via Google's Gemini API.
//!
//! This crate backs the `nanobanana` command-line tool: it composes prompts
//! (optionally from a style template), attaches an edit or reference image,
//! issues one synchronous request per prompt and writes the returned images
//! to disk.
//!
//! # Quick Start
//!
//! ```no_run
//! use nanobanana::{Config, GeminiClient, GenerationRequest, ImageProvider};
//!
//! #[tokio::main]
//! async fn main() -> nanobanana::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = GeminiClient::builder().api_key(config.api_key()).build()?;
//!
//!     let request = GenerationRequest::new("A minimal 3D cube on a black background");
//!     if let nanobanana::GenerationOutcome::Image(image) = client.generate(&request).await? {
//!         image.save("cube.png")?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
mod config;
mod error;
pub mod gemini;
pub mod output;
pub mod prompt;
mod provider;
mod types;

pub use config::Config;
pub use error::{NanoBananaError, Result};
pub use gemini::{GeminiClient, GeminiClientBuilder, GeminiModel};
pub use provider::ImageProvider;
pub use types::{
    AspectRatio, GeneratedImage, GenerationOutcome, GenerationRequest, ImageFormat, ImageRole,
    InputImage,
};
