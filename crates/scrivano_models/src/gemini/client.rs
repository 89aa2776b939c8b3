//! Google Gemini text-generation client.

use async_trait::async_trait;
use std::env;
use tracing::instrument;

use gemini_rust::{Gemini, Tool, client::Model};

use scrivano_error::{CollaboratorError, CollaboratorErrorKind};
use scrivano_interface::ContentDriver;

use super::GeminiResult;

/// Default model for prompt enhancement and article generation.
const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Client for the Google Gemini REST API.
///
/// Holds a single model-bound `gemini-rust` client. The pipeline uses one
/// model for both text stages, so no client pooling is needed here; a second
/// instance with [`GeminiClient::with_model`] covers per-stage model splits.
///
/// Every call attaches the Google Search grounding tool, so enhancement
/// briefs and generated articles draw on current search results rather than
/// training data alone.
pub struct GeminiClient {
    client: Gemini,
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client bound to the default model.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns error if the key is missing or the SDK client cannot be built.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> GeminiResult<Self> {
        Self::with_model(DEFAULT_MODEL)
    }

    /// Create a client bound to a specific model.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scrivano_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::with_model("gemini-2.5-flash")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_with_model")]
    pub fn with_model(model_name: &str) -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| CollaboratorError::new(CollaboratorErrorKind::MissingApiKey))?;

        let client = Gemini::with_model(&api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| {
                CollaboratorError::new(CollaboratorErrorKind::ClientCreation(e.to_string()))
            })?;

        Ok(Self {
            client,
            model_name: model_name.to_string(),
        })
    }

    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Maps known model name strings to their enum variants, using
    /// Model::Custom (with the "models/" prefix the API requires) for
    /// everything else.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured errors with HTTP
    /// status codes when available.
    fn parse_gemini_error(err: impl std::fmt::Display) -> CollaboratorError {
        let err_msg = err.to_string();

        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            CollaboratorError::new(CollaboratorErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            CollaboratorError::new(CollaboratorErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    ///
    /// Parses strings like "bad response from server; code 503; description: ..."
    /// and extracts the numeric status code.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        if let Some(code_start) = error_msg.find("code ") {
            let code_str = &error_msg[code_start + 5..];
            if let Some(end) = code_str.find(|c: char| !c.is_numeric()) {
                return code_str[..end].parse().ok();
            }
        }
        None
    }
}

#[async_trait]
impl ContentDriver for GeminiClient {
    #[instrument(name = "gemini_generate_text", skip(self, prompt), fields(model = %self.model_name, prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        let response = self
            .client
            .generate_content()
            .with_user_message(prompt)
            .with_tool(Tool::google_search())
            .execute()
            .await
            .map_err(Self::parse_gemini_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(CollaboratorError::new(CollaboratorErrorKind::EmptyResponse(
                format!("model {} returned no text", self.model_name),
            )));
        }

        tracing::debug!(reply_len = text.len(), "Received Gemini reply");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
