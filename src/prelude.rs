//! Convenience re-exports for common use.

pub use crate::error::{CaminaError, ProviderErrorKind, Result};
pub use crate::parser::{ParserRegistry, ResponseParser};
pub use crate::types::{
    ContentBlock, FinishReason, GenerateResult, ThinkingContent, ToolInvocation, Usage,
};
