//! Storage layer for Redline.
//!
//! This module provides SQLite persistence for the four review entities:
//! documents, paragraphs, compliance rules, and violations. Paragraph order
//! within a document is an explicit `position` column assigned at insert time,
//! so content edits never reorder a paragraph among its siblings.

mod compliance_store;
mod models;

pub use compliance_store::ComplianceStore;
pub use models::{ComplianceRule, Document, Neighbors, Paragraph, Violation, now_ms};
