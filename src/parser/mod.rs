//! Response parser trait and per-vendor implementations.

#[cfg(feature = "anthropic")]
pub mod anthropic;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::types::GenerateResult;

/// Translates one vendor's wire shapes into [`GenerateResult`] values.
///
/// Implementations are pure and stateless: both entry points are plain
/// functions of their input, never mutate the document they are given, and
/// are safe to call concurrently without synchronization. The transport
/// layer decides success vs. error by status code and dispatches to the
/// matching entry point.
pub trait ResponseParser: Send + Sync {
    /// Provider name this parser understands (e.g. "anthropic").
    fn provider_name(&self) -> &str;

    /// Parse a successful completion payload into a normalized result.
    ///
    /// Fails with [`CaminaError::MalformedResponse`] only when a
    /// structurally required field is absent or of the wrong type;
    /// unexpected extra fields and unknown block kinds are tolerated.
    ///
    /// [`CaminaError::MalformedResponse`]: crate::error::CaminaError::MalformedResponse
    fn parse_success_response(&self, response: &serde_json::Value) -> Result<GenerateResult>;

    /// Classify an error response into a typed failure.
    ///
    /// Always returns `Err` with a [`CaminaError::Provider`] value; the
    /// body need not be valid JSON.
    ///
    /// [`CaminaError::Provider`]: crate::error::CaminaError::Provider
    fn parse_error_response(&self, status_code: u16, body: &str) -> Result<GenerateResult>;
}

/// Registry of response parsers, keyed by provider name.
///
/// The transport boundary looks up the parser for the provider it just
/// talked to; adding a vendor means registering one more implementation.
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn ResponseParser>>,
}

impl ParserRegistry {
    /// An empty registry with no parsers.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register a parser under its own provider name, replacing any
    /// previous registration for that name.
    pub fn register(&mut self, parser: Arc<dyn ResponseParser>) {
        self.parsers.insert(parser.provider_name().to_string(), parser);
    }

    /// Look up the parser for a provider.
    pub fn get(&self, provider: &str) -> Option<Arc<dyn ResponseParser>> {
        self.parsers.get(provider).cloned()
    }

    /// Names of all registered providers.
    pub fn providers(&self) -> Vec<&str> {
        self.parsers.keys().map(String::as_str).collect()
    }
}

impl Default for ParserRegistry {
    /// Registry with all built-in parsers enabled via feature flags.
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();
        #[cfg(feature = "anthropic")]
        registry.register(Arc::new(anthropic::AnthropicResponseParser));
        registry
    }
}
