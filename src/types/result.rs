//! The normalized outcome of one generation request.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::content::{ContentBlock, ToolInvocation};
use super::usage::Usage;

/// Provider-independent result of a single generation request.
///
/// Owned by the caller after return; parsers hold no reference to it and
/// retain no state between calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerateResult {
    /// Generated content blocks, in the order the vendor produced them.
    pub content: Vec<ContentBlock>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    /// Vendor response id, when the payload carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Model that served the request, when the payload carried it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl GenerateResult {
    /// Concatenated text of all text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Tool calls the model requested, in content order.
    pub fn tool_calls(&self) -> Vec<&ToolInvocation> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse(tc) => Some(tc),
                _ => None,
            })
            .collect()
    }
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    /// Fallback for vendor stop reasons this library does not recognize.
    /// Distinct from [`FinishReason::Stop`] so vendor protocol changes stay
    /// visible to callers.
    #[default]
    Other,
}
