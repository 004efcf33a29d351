//! Camina — provider response normalization
//!
//! The seam between an HTTP transport and the rest of an AI client library:
//! takes the raw JSON a vendor's chat-completion endpoint returned (success
//! or error) and reduces it to one provider-independent [`GenerateResult`]
//! or a typed [`CaminaError`]. Transport, retries, request construction and
//! streaming live elsewhere; this crate is the pure translation stage.
//!
//! # Quick Start
//!
//! ```
//! use camina::prelude::*;
//!
//! # fn example() -> camina::error::Result<()> {
//! let registry = ParserRegistry::default();
//! let parser = registry.get("anthropic").unwrap();
//!
//! let body: serde_json::Value = serde_json::from_str(
//!     r#"{"content":[{"type":"text","text":"Hi!"}],"stop_reason":"end_turn",
//!         "usage":{"input_tokens":3,"output_tokens":2}}"#,
//! )?;
//! let result = parser.parse_success_response(&body)?;
//! assert_eq!(result.text(), "Hi!");
//! assert_eq!(result.finish_reason, FinishReason::Stop);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [`GenerateResult`]: types::GenerateResult
//! [`CaminaError`]: error::CaminaError

pub mod error;
pub mod parser;
pub mod prelude;
pub mod types;
