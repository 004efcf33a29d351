//! Content blocks — the units of generated output.

use serde::{Deserialize, Serialize};

/// One unit of generated output within a single response.
///
/// Parsers decode the vendor's typed blocks into this closed union so
/// downstream code never re-inspects raw JSON. Kinds a parser does not
/// recognize degrade to [`ContentBlock::Opaque`] rather than failing, to
/// stay forward-compatible with vendor additions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse(ToolInvocation),
    Thinking(ThinkingContent),
    RedactedThinking {
        data: String,
    },
    /// A block kind this library does not know about, carried verbatim.
    Opaque {
        kind: String,
        data: serde_json::Value,
    },
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    /// Structured arguments as the vendor sent them.
    pub input: serde_json::Value,
}

/// Extended-thinking content with its verification signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThinkingContent {
    pub thinking: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}
