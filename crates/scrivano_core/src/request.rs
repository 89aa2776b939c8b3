//! The user-submitted generation request and its options.

use scrivano_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique token identifying one pipeline run.
///
/// Minted once at intake; keys all downstream state. Never reused.
///
/// # Examples
///
/// ```
/// use scrivano_core::RequestId;
///
/// let a = RequestId::mint();
/// let b = RequestId::mint();
/// assert_ne!(a, b);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Mint a fresh random identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

/// Voice of the generated article.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    /// Neutral, business-appropriate voice
    #[default]
    Professional,
    /// Relaxed, colloquial voice
    Casual,
    /// Elevated, precise voice
    Formal,
    /// Warm, approachable voice
    Friendly,
    /// Confident, expert voice
    Authoritative,
    /// Dialogue-like voice
    Conversational,
}

/// Rhetorical mode of the generated article.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Style {
    /// Fact-forward exposition
    #[default]
    Informative,
    /// Argues for a position
    Persuasive,
    /// Teaches a skill or concept
    Educational,
    /// Narrative-driven
    Storytelling,
    /// Deep technical detail
    Technical,
    /// Free-form creative writing
    Creative,
}

/// Output formatting flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingOptions {
    /// Emit markdown rather than plain text
    pub use_markdown: bool,
    /// Emit section headings
    pub use_headings: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            use_markdown: true,
            use_headings: true,
        }
    }
}

/// Generation steering options.
///
/// All fields have sensible defaults matching a mid-length informative post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase", default)]
#[builder(default)]
pub struct GenerationOptions {
    /// Voice of the article
    pub tone: Tone,
    /// Rhetorical mode of the article
    pub style: Style,
    /// Target word count
    pub word_count: u32,
    /// Target number of main sections
    pub section_count: u32,
    /// Whether to open with an introduction
    pub include_intro: bool,
    /// Whether to close with a conclusion
    pub include_conclusion: bool,
    /// Output formatting flags
    pub formatting: FormattingOptions,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            style: Style::default(),
            word_count: 1500,
            section_count: 5,
            include_intro: true,
            include_conclusion: true,
            formatting: FormattingOptions::default(),
        }
    }
}

/// The user-submitted brief for one article.
///
/// Immutable once accepted by intake; every stage receives a copy.
///
/// # Examples
///
/// ```
/// use scrivano_core::GenerationRequest;
///
/// let request = GenerationRequest {
///     topic: "Rust async pipelines".to_string(),
///     keywords: vec!["rust".to_string(), "tokio".to_string()],
///     target_audience: None,
///     additional_context: None,
///     options: None,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Subject of the article
    pub topic: String,
    /// Seed keywords, in priority order
    pub keywords: Vec<String>,
    /// Intended readership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub target_audience: Option<String>,
    /// Free-text notes from the requester
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub additional_context: Option<String>,
    /// Generation steering options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub options: Option<GenerationOptions>,
}

impl GenerationRequest {
    /// Validate the request against intake rules.
    ///
    /// Tone and style are constrained by the type system; the remaining rules
    /// are checked here: non-blank topic, at least one keyword, positive word
    /// and section count targets.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyTopic));
        }
        if self.keywords.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyKeywords));
        }
        if let Some(options) = &self.options {
            if options.word_count == 0 {
                return Err(ValidationError::new(ValidationErrorKind::InvalidWordCount(
                    options.word_count,
                )));
            }
            if options.section_count == 0 {
                return Err(ValidationError::new(
                    ValidationErrorKind::InvalidSectionCount(options.section_count),
                ));
            }
        }
        Ok(())
    }

    /// The effective options, falling back to defaults when none were given.
    pub fn effective_options(&self) -> GenerationOptions {
        self.options.clone().unwrap_or_default()
    }
}
