//! Prompt composition: style templates and role-dependent rewriting.

use crate::error::{NanoBananaError, Result};
use crate::types::ImageRole;
use std::path::Path;

/// A reusable block of descriptive text prefixed to every prompt in a batch.
///
/// The content is treated as an opaque string, never parsed or validated.
#[derive(Debug, Clone)]
pub struct StyleTemplate(String);

impl StyleTemplate {
    /// Loads a style description from a plain-text/markdown file, trimming
    /// surrounding whitespace. A missing path is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NanoBananaError::InputNotFound {
                kind: "Style",
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self(content.trim().to_string()))
    }

    /// Returns the style text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Merges a style description with the user's subject prompt.
///
/// Without a style the prompt passes through unchanged.
pub fn compose(user_prompt: &str, style: Option<&str>) -> String {
    match style {
        Some(style) => format!("{style}\n\nSubject: {user_prompt}"),
        None => user_prompt.to_string(),
    }
}

/// Prefixes the composed prompt with wording matching the input image's role.
pub fn apply_image_role(prompt: &str, role: Option<ImageRole>) -> String {
    match role {
        Some(ImageRole::Edit) => format!("Edit this image: {prompt}"),
        Some(ImageRole::Reference) => {
            format!("Using this image as a style reference, create: {prompt}")
        }
        None => prompt.to_string(),
    }
}

/// Full composition pipeline: style merge, then role prefix.
pub fn compose_full(
    user_prompt: &str,
    style: Option<&StyleTemplate>,
    role: Option<ImageRole>,
) -> String {
    let composed = compose(user_prompt, style.map(StyleTemplate::as_str));
    apply_image_role(&composed, role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_without_style_is_identity() {
        assert_eq!(compose("a red cube", None), "a red cube");
        assert_eq!(compose("", None), "");
    }

    #[test]
    fn test_compose_with_style() {
        assert_eq!(
            compose("a gear icon", Some("Blue glass 3D render")),
            "Blue glass 3D render\n\nSubject: a gear icon"
        );
    }

    #[test]
    fn test_apply_edit_role() {
        assert_eq!(
            apply_image_role("make the sky blue", Some(ImageRole::Edit)),
            "Edit this image: make the sky blue"
        );
    }

    #[test]
    fn test_apply_reference_role() {
        assert_eq!(
            apply_image_role("a sphere", Some(ImageRole::Reference)),
            "Using this image as a style reference, create: a sphere"
        );
    }

    #[test]
    fn test_apply_no_role_is_identity() {
        assert_eq!(apply_image_role("a sphere", None), "a sphere");
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose("cube", Some("style"));
        let b = compose("cube", Some("style"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_compose_full_chains_style_then_role() {
        let style = StyleTemplate("Minimal 3D".to_string());
        assert_eq!(
            compose_full("a cube", Some(&style), Some(ImageRole::Edit)),
            "Edit this image: Minimal 3D\n\nSubject: a cube"
        );
    }

    #[test]
    fn test_style_load_missing() {
        let err = StyleTemplate::load("styles/nope.md").unwrap_err();
        assert_eq!(err.to_string(), "Style file not found: styles/nope.md");
    }

    #[test]
    fn test_style_load_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.md");
        std::fs::write(&path, "  blue glass\n\n").unwrap();

        let style = StyleTemplate::load(&path).unwrap();
        assert_eq!(style.as_str(), "blue glass");
    }
}
