//! Sequential batch orchestration: one request per prompt, in order.

use crate::error::Result;
use crate::output;
use crate::prompt::{self, StyleTemplate};
use crate::provider::ImageProvider;
use crate::types::{AspectRatio, GenerationOutcome, GenerationRequest, InputImage};
use std::path::PathBuf;

const PROGRESS_PROMPT_LEN: usize = 50;

/// One batch of prompts sharing a style, input image and output template.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Base output path; suffixed per prompt when the batch has several.
    pub output: PathBuf,
    /// The user's subject prompts, one request each.
    pub prompts: Vec<String>,
    /// Optional style description prefixed to every prompt.
    pub style: Option<StyleTemplate>,
    /// Optional edit/reference image reused identically for every prompt.
    pub input_image: Option<InputImage>,
    /// Aspect ratio for every generated image.
    pub aspect_ratio: AspectRatio,
}

/// What happened across a whole batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Number of prompts processed.
    pub total: usize,
    /// Output paths written, in prompt order.
    pub saved: Vec<PathBuf>,
    /// Number of prompts that produced no image.
    pub failed: usize,
}

/// Runs the batch against the provider, strictly in prompt order.
///
/// Every per-prompt failure is contained: it is reported on stderr and the
/// loop moves on. Only the write of an already-received image can abort the
/// batch, since at that point the local filesystem is the problem.
pub async fn run<P: ImageProvider>(provider: &P, batch: &BatchRequest) -> Result<BatchSummary> {
    let total = batch.prompts.len();
    let mut summary = BatchSummary {
        total,
        ..Default::default()
    };

    for (i, user_prompt) in batch.prompts.iter().enumerate() {
        let index = i + 1;
        let role = batch.input_image.as_ref().map(|image| image.role);
        let full_prompt = prompt::compose_full(user_prompt, batch.style.as_ref(), role);
        let output_path = output::resolve_output_path(&batch.output, index, total);

        println!(
            "Generating ({index}/{total}): {}...",
            truncate_chars(user_prompt, PROGRESS_PROMPT_LEN)
        );

        let request = GenerationRequest {
            prompt: full_prompt,
            aspect_ratio: batch.aspect_ratio,
            input_image: batch.input_image.clone(),
        };

        match provider.generate(&request).await {
            Ok(GenerationOutcome::Image(image)) => {
                output::ensure_parent_dir(&output_path)?;
                image.save(&output_path)?;
                println!("Saved: {}", output_path.display());
                summary.saved.push(output_path);
            }
            Ok(GenerationOutcome::Text(text)) => {
                println!("Model response: {text}");
                eprintln!("Failed to generate image for: {user_prompt}");
                summary.failed += 1;
            }
            Ok(GenerationOutcome::Empty) => {
                eprintln!("Failed to generate image for: {user_prompt}");
                summary.failed += 1;
            }
            Err(err) => {
                eprintln!("API Error: {err}");
                eprintln!("Failed to generate image for: {user_prompt}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NanoBananaError;
    use crate::types::{GeneratedImage, ImageFormat, ImageRole};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stub provider that records every request and replays canned outcomes.
    struct StubProvider {
        requests: Mutex<Vec<GenerationRequest>>,
        outcomes: Mutex<Vec<Result<GenerationOutcome>>>,
    }

    impl StubProvider {
        fn new(outcomes: Vec<Result<GenerationOutcome>>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                outcomes: Mutex::new(outcomes),
            }
        }

        fn recorded_prompts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.prompt.clone())
                .collect()
        }
    }

    #[async_trait]
    impl ImageProvider for StubProvider {
        async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn image_outcome() -> Result<GenerationOutcome> {
        Ok(GenerationOutcome::Image(GeneratedImage::new(
            b"fake image bytes".to_vec(),
            ImageFormat::Png,
        )))
    }

    #[tokio::test]
    async fn test_two_prompt_batch_writes_suffixed_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::new(vec![image_outcome(), image_outcome()]);
        let batch = BatchRequest {
            output: dir.path().join("out.png"),
            prompts: vec!["cube".into(), "sphere".into()],
            style: None,
            input_image: None,
            aspect_ratio: AspectRatio::Square,
        };

        let summary = run(&provider, &batch).await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            summary.saved,
            vec![dir.path().join("out_1.png"), dir.path().join("out_2.png")]
        );
        assert!(dir.path().join("out_1.png").is_file());
        assert!(dir.path().join("out_2.png").is_file());
        // Prompts pass through unchanged when no style or image is attached
        assert_eq!(provider.recorded_prompts(), vec!["cube", "sphere"]);
    }

    #[tokio::test]
    async fn test_single_prompt_uses_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::new(vec![image_outcome()]);
        let batch = BatchRequest {
            output: dir.path().join("render.png"),
            prompts: vec!["cube".into()],
            style: None,
            input_image: None,
            aspect_ratio: AspectRatio::Square,
        };

        let summary = run(&provider, &batch).await.unwrap();
        assert_eq!(summary.saved, vec![dir.path().join("render.png")]);
        assert_eq!(
            std::fs::read(dir.path().join("render.png")).unwrap(),
            b"fake image bytes"
        );
    }

    #[tokio::test]
    async fn test_style_and_edit_role_shape_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::new(vec![image_outcome()]);
        let batch = BatchRequest {
            output: dir.path().join("out.png"),
            prompts: vec!["a gear icon".into()],
            style: Some(StyleTemplate::load(write_style(&dir, "Blue glass")).unwrap()),
            input_image: Some(InputImage {
                data: vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0],
                role: ImageRole::Edit,
            }),
            aspect_ratio: AspectRatio::Square,
        };

        run(&provider, &batch).await.unwrap();

        let prompts = provider.recorded_prompts();
        assert_eq!(
            prompts,
            vec!["Edit this image: Blue glass\n\nSubject: a gear icon"]
        );
        let requests = provider.requests.lock().unwrap();
        assert!(requests[0].input_image.is_some());
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::new(vec![
            Err(NanoBananaError::Api {
                status: 500,
                message: "boom".into(),
            }),
            Ok(GenerationOutcome::Text("cannot comply".into())),
            image_outcome(),
        ]);
        let batch = BatchRequest {
            output: dir.path().join("out.png"),
            prompts: vec!["one".into(), "two".into(), "three".into()],
            style: None,
            input_image: None,
            aspect_ratio: AspectRatio::Square,
        };

        let summary = run(&provider, &batch).await.unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.saved, vec![dir.path().join("out_3.png")]);
        // All three prompts were attempted despite the early failures
        assert_eq!(provider.recorded_prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_output_parent_dirs_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::new(vec![image_outcome()]);
        let batch = BatchRequest {
            output: dir.path().join("nested/deeper/out.png"),
            prompts: vec!["cube".into()],
            style: None,
            input_image: None,
            aspect_ratio: AspectRatio::Square,
        };

        run(&provider, &batch).await.unwrap();
        assert!(dir.path().join("nested/deeper/out.png").is_file());
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("short", 50), "short");
        let long = "x".repeat(80);
        assert_eq!(truncate_chars(&long, 50).len(), 50);
        // Multi-byte characters are never split
        let emoji = "🎨".repeat(60);
        assert_eq!(truncate_chars(&emoji, 50).chars().count(), 50);
    }

    fn write_style(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("style.md");
        std::fs::write(&path, content).unwrap();
        path
    }
}
