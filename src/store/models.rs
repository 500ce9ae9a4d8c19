//! Entity types persisted by the compliance store.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current timestamp in milliseconds since Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// A user-submitted text artifact under review.
///
/// Root of ownership for its paragraphs. The stored `content` is the original
/// upload; paragraph edits mutate paragraph rows, never this field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: i64,
    pub name: String,
    pub content: String,

    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

/// One ordered, non-blank line-derived unit of a document.
///
/// `position` is the index in the segmented sequence at upload time and is
/// stable for the life of the paragraph: accepting an edit replaces `content`
/// wholesale but never moves the paragraph among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paragraph {
    pub id: i64,
    pub document_id: i64,
    pub content: String,
    pub position: i64,
}

/// A natural-language policy statement checked against paragraphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceRule {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A record of one rule-check outcome for one paragraph.
///
/// `highlighted_text` is the gateway's raw judgment and is not guaranteed to
/// be a verbatim substring of the paragraph it was checked against.
/// `suggested_fix` is filled in by a later suggest call; `accepted` records
/// the reviewer's decision verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    pub id: i64,
    pub paragraph_id: i64,
    pub rule_id: i64,
    pub highlighted_text: String,
    pub suggested_fix: Option<String>,
    pub accepted: bool,

    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

/// A paragraph with its immediate siblings by stored order.
///
/// `previous`/`next` are None at the sequence boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighbors {
    pub previous: Option<Paragraph>,
    pub current: Paragraph,
    pub next: Option<Paragraph>,
}
