//! Review progress as an explicit value.
//!
//! A cursor identifies the paragraph under review by (document, position).
//! It is owned by the caller and passed into each call; nothing about review
//! progress lives in process state, so a review can be dropped and resumed
//! from a serialized cursor.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{ComplianceStore, Paragraph};

/// Position of a review walk within one document's paragraph sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCursor {
    pub document_id: i64,
    pub position: usize,
}

impl ReviewCursor {
    /// Cursor at the first paragraph of a document.
    pub fn start(document_id: i64) -> Self {
        Self {
            document_id,
            position: 0,
        }
    }

    /// The paragraph under the cursor, or None if the cursor is past the end
    /// (including the empty-document case).
    pub fn current(&self, store: &ComplianceStore) -> Result<Option<Paragraph>> {
        let paragraphs = store.paragraphs_by_document(self.document_id)?;
        Ok(paragraphs.into_iter().nth(self.position))
    }

    /// Cursor over the next paragraph, or None at the end of the sequence.
    pub fn advance(&self, store: &ComplianceStore) -> Result<Option<ReviewCursor>> {
        let count = store.paragraphs_by_document(self.document_id)?.len();
        if self.position + 1 < count {
            Ok(Some(ReviewCursor {
                document_id: self.document_id,
                position: self.position + 1,
            }))
        } else {
            Ok(None)
        }
    }

    /// Cursor over the previous paragraph, or None at the start.
    pub fn retreat(&self) -> Option<ReviewCursor> {
        if self.position > 0 {
            Some(ReviewCursor {
                document_id: self.document_id,
                position: self.position - 1,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_paragraphs(texts: &[&str]) -> (ComplianceStore, i64) {
        let mut store = ComplianceStore::open_in_memory().unwrap();
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let (doc_id, _) = store
            .create_document_with_paragraphs("doc", &texts.join("\n"), &texts)
            .unwrap();
        (store, doc_id)
    }

    #[test]
    fn test_cursor_walk_forward() {
        let (store, doc_id) = store_with_paragraphs(&["a", "b", "c"]);

        let cursor = ReviewCursor::start(doc_id);
        assert_eq!(cursor.current(&store).unwrap().unwrap().content, "a");

        let cursor = cursor.advance(&store).unwrap().unwrap();
        assert_eq!(cursor.current(&store).unwrap().unwrap().content, "b");

        let cursor = cursor.advance(&store).unwrap().unwrap();
        assert_eq!(cursor.current(&store).unwrap().unwrap().content, "c");
        assert!(cursor.advance(&store).unwrap().is_none());
    }

    #[test]
    fn test_cursor_retreat() {
        let (store, doc_id) = store_with_paragraphs(&["a", "b"]);

        let cursor = ReviewCursor::start(doc_id);
        assert!(cursor.retreat().is_none());

        let cursor = cursor.advance(&store).unwrap().unwrap();
        let back = cursor.retreat().unwrap();
        assert_eq!(back.current(&store).unwrap().unwrap().content, "a");
    }

    #[test]
    fn test_cursor_empty_document() {
        let mut store = ComplianceStore::open_in_memory().unwrap();
        let doc_id = store.create_document("empty", "").unwrap();

        let cursor = ReviewCursor::start(doc_id);
        assert!(cursor.current(&store).unwrap().is_none());
        assert!(cursor.advance(&store).unwrap().is_none());
    }

    #[test]
    fn test_cursor_survives_content_edit() {
        let (mut store, doc_id) = store_with_paragraphs(&["a", "b", "c"]);
        let cursor = ReviewCursor::start(doc_id).advance(&store).unwrap().unwrap();

        let rule_id = store.create_rule("Rule 1", "desc").unwrap();
        let para = cursor.current(&store).unwrap().unwrap();
        let v = store.create_violation(para.id, rule_id, "issue").unwrap();
        store.accept_edit(v, "b-edited", true).unwrap();

        // Same position, new content, unchanged neighbors
        assert_eq!(cursor.current(&store).unwrap().unwrap().content, "b-edited");
        assert_eq!(
            cursor.retreat().unwrap().current(&store).unwrap().unwrap().content,
            "a"
        );
    }

    #[test]
    fn test_cursor_serializes() {
        let cursor = ReviewCursor {
            document_id: 3,
            position: 2,
        };
        let json = serde_json::to_string(&cursor).unwrap();
        let restored: ReviewCursor = serde_json::from_str(&json).unwrap();
        assert_eq!(cursor, restored);
    }
}
