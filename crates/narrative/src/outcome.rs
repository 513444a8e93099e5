use serde::{Deserialize, Serialize};

/// Raw service response shape. Optional fields default so older service
/// builds that omit them still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResponse {
    pub generated: bool,
    #[serde(default)]
    pub content: String,
    /// Model identifier the service generated with; shown on the report
    /// cover when present.
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub tokens_used: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// What the report path actually cares about: did we get usable text, did
/// the service run out of budget mid-generation, or did it decline.
///
/// Transport and decode failures are *not* outcomes; those surface as
/// [`NarrativeError`](crate::NarrativeError) so the caller can decide
/// whether to re-run without a narrative.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    Generated {
        text: String,
        model: String,
        tokens: Option<TokenUsage>,
    },
    /// The service reported success but produced no text, which in practice
    /// means the token budget ran out before any content was emitted. The
    /// finish reason is the signal worth showing the user.
    BudgetExhausted {
        model: String,
        finish_reason: String,
    },
    /// The service declined to generate.
    NotGenerated { finish_reason: Option<String> },
}

impl NarrativeOutcome {
    /// Map a decoded response onto an outcome. Whitespace-only content
    /// counts as empty.
    #[must_use]
    pub fn classify(response: NarrativeResponse) -> Self {
        if !response.generated {
            return Self::NotGenerated {
                finish_reason: response.finish_reason,
            };
        }
        if response.content.trim().is_empty() {
            return Self::BudgetExhausted {
                model: response.model,
                finish_reason: response
                    .finish_reason
                    .unwrap_or_else(|| "unknown".to_string()),
            };
        }
        Self::Generated {
            text: response.content,
            model: response.model,
            tokens: response.tokens_used,
        }
    }

    #[must_use]
    pub const fn has_text(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }

    /// Model name when the service got far enough to report one.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Generated { model, .. } | Self::BudgetExhausted { model, .. } => {
                (!model.is_empty()).then_some(model.as_str())
            }
            Self::NotGenerated { .. } => None,
        }
    }
}
