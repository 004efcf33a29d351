//! Core types for Camina.

pub mod content;
pub mod result;
pub mod usage;

pub use content::*;
pub use result::*;
pub use usage::*;
