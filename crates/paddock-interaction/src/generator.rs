//! Text generation pipeline.
//!
//! A [`TextGenerator`] attempts the remote model first, sanitizes its
//! output and otherwise falls back to the deterministic template pools.
//! The pipeline never raises to the caller; the worst observable outcome
//! is the fixed default message.

use crate::mistral_api_client::MistralApiClient;
use crate::templates;
use rand::RngCore;
use thiserror::Error;

/// Fixed message returned when a remote reply sanitizes down to nothing.
pub const DEFAULT_MESSAGE: &str = "Ready to give it everything on track! 🏎️ #F1";

/// Errors a remote text model can produce.
///
/// These never cross the engine boundary; the pipeline logs them and
/// degrades to the template path.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Credential or endpoint configuration missing or unusable
    #[error("model configuration: {0}")]
    Configuration(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("model request failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("model endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not contain usable text
    #[error("malformed model response: {0}")]
    Malformed(String),
}

/// Capability interface for remote text generation.
///
/// A single blocking attempt per call, bounded by the implementation's
/// request timeout. The engine works fully without any implementation.
pub trait TextModel {
    fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Strips meta-commentary from a raw remote reply.
///
/// Keeps contiguous message-like lines, drops bullet points, "why this
/// works" annotations, labelled fields, headings and notes, then returns
/// the first paragraph of what remains. `None` when nothing usable is
/// left.
pub fn sanitize_reply(raw: &str) -> Option<String> {
    let mut message_lines = Vec::new();

    for line in raw.lines() {
        let line = line.trim();

        let is_meta = (line.starts_with('*') && line.contains("chars"))
            || line.starts_with("**Why this works:")
            || line.starts_with("- **")
            || line.starts_with("- ")
            || line.starts_with("**")
            || line.contains("F1 terminology")
            || line.contains("Emotion:")
            || line.contains("Relevant details:");
        if is_meta {
            continue;
        }

        if !line.is_empty() && !line.starts_with('#') && !line.starts_with("Note:") {
            message_lines.push(line);
        } else if line.is_empty() && !message_lines.is_empty() {
            // Paragraph boundary: the first paragraph is the message.
            break;
        }
    }

    if message_lines.is_empty() {
        None
    } else {
        Some(message_lines.join("\n"))
    }
}

/// The remote-first, template-fallback text generator.
pub struct TextGenerator {
    model: Option<Box<dyn TextModel>>,
}

impl TextGenerator {
    /// Builds a generator with whatever remote model the environment
    /// provides. A missing credential silently selects the template path.
    pub fn from_env() -> Self {
        let model = match MistralApiClient::try_from_env() {
            Ok(client) => Some(Box::new(client) as Box<dyn TextModel>),
            Err(err) => {
                tracing::debug!(%err, "no remote text model configured, using templates");
                None
            }
        };
        Self { model }
    }

    /// Builds a generator around an explicit model implementation.
    pub fn with_model(model: Box<dyn TextModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Builds a generator with no remote model at all.
    pub fn without_model() -> Self {
        Self { model: None }
    }

    /// Runs the pipeline for one prompt. Never fails.
    pub fn generate(&self, prompt: &str, rng: &mut dyn RngCore) -> String {
        if let Some(model) = &self.model {
            match model.complete(prompt) {
                Ok(raw) => {
                    return sanitize_reply(&raw).unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
                }
                Err(err) => {
                    tracing::debug!(%err, "remote text model failed, falling back to templates");
                }
            }
        }

        let category = templates::classify(prompt);
        templates::pick(category, rng).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FixedModel(Result<&'static str, fn() -> ModelError>);

    impl TextModel for FixedModel {
        fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    #[test]
    fn test_sanitize_keeps_first_paragraph() {
        let raw = "Pushed hard all session, the car felt alive today!\n\
                   More laps tomorrow.\n\
                   \n\
                   Second paragraph should be dropped.";
        let cleaned = sanitize_reply(raw).unwrap();
        assert_eq!(
            cleaned,
            "Pushed hard all session, the car felt alive today!\nMore laps tomorrow."
        );
    }

    #[test]
    fn test_sanitize_strips_meta_commentary() {
        let raw = "**Why this works:**\n\
                   - **Emotion:** confident\n\
                   - uses F1 terminology\n\
                   # Heading\n\
                   Note: under 280 chars\n\
                   What a lap that was! The grip was unreal out there.\n\
                   *(142 chars)*";
        let cleaned = sanitize_reply(raw).unwrap();
        assert_eq!(cleaned, "What a lap that was! The grip was unreal out there.");
    }

    #[test]
    fn test_sanitize_all_meta_yields_none() {
        let raw = "**Why this works:**\n- **Emotion:** confident\n# Heading";
        assert!(sanitize_reply(raw).is_none());
    }

    #[test]
    fn test_successful_model_reply_is_sanitized() {
        let generator = TextGenerator::with_model(Box::new(FixedModel(Ok(
            "Mega day in the car!\n\n- **Emotion:** joy",
        ))));
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(generator.generate("anything", &mut rng), "Mega day in the car!");
    }

    #[test]
    fn test_unusable_model_reply_returns_default() {
        let generator =
            TextGenerator::with_model(Box::new(FixedModel(Ok("- **Emotion:** joy"))));
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(generator.generate("anything", &mut rng), DEFAULT_MESSAGE);
    }

    #[test]
    fn test_model_failure_falls_back_to_matching_template() {
        let generator = TextGenerator::with_model(Box::new(FixedModel(Err(|| {
            ModelError::Status {
                status: 503,
                message: "overloaded".into(),
            }
        }))));
        let mut rng = StdRng::seed_from_u64(2);
        let message = generator.generate("a difficult day at the office", &mut rng);
        assert!(TemplateCategory::Setback.contains_message(&message));
        assert!(!message.is_empty());
    }

    #[test]
    fn test_no_model_goes_straight_to_templates() {
        let generator = TextGenerator::without_model();
        let mut rng = StdRng::seed_from_u64(2);
        let message = generator.generate("victory lap celebrations", &mut rng);
        assert!(TemplateCategory::Victory.contains_message(&message));
    }
}
