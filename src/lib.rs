//! Redline - a document compliance review tool
//!
//! Documents are split into ordered paragraphs, checked against compliance
//! rules through an LLM gateway, and reviewed by a human who accepts or edits
//! suggested fixes.

pub mod config;
pub mod error;
pub mod llm;
pub mod segment;
pub mod store;
pub mod workflow;

pub use error::{RedlineError, Result};
