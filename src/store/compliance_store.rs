//! ComplianceStore implementation over SQLite.
//!
//! Every operation opens no resource beyond its own call: reads run against
//! the shared connection, multi-row writes go through a single transaction so
//! a batch either lands completely or not at all.

use crate::error::{RedlineError, Result};
use crate::store::models::{ComplianceRule, Document, Neighbors, Paragraph, Violation, now_ms};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

/// SQLite-backed persistence for documents, paragraphs, rules, and violations.
pub struct ComplianceStore {
    db: Connection,
}

impl ComplianceStore {
    /// Open or create a store at the given database path.
    pub fn open(db_path: &Path) -> Result<Self> {
        let db = Connection::open(db_path)?;
        Self::init(db)
    }

    /// Open an in-memory store. Useful for testing.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory()?;
        Self::init(db)
    }

    fn init(db: Connection) -> Result<Self> {
        db.pragma_update(None, "foreign_keys", true)?;
        Self::init_schema(&db)?;
        Ok(Self { db })
    }

    /// Initialize the SQLite schema.
    fn init_schema(db: &Connection) -> Result<()> {
        db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS paragraphs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document_id INTEGER NOT NULL REFERENCES documents(id),
                content TEXT NOT NULL,
                position INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS compliance_rules (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS violations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                paragraph_id INTEGER NOT NULL REFERENCES paragraphs(id),
                rule_id INTEGER NOT NULL REFERENCES compliance_rules(id),
                highlighted_text TEXT NOT NULL,
                suggested_fix TEXT,
                accepted INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_paragraphs_document ON paragraphs(document_id, position);
            CREATE INDEX IF NOT EXISTS idx_violations_paragraph ON violations(paragraph_id);
            "#,
        )?;

        Ok(())
    }

    // --- documents ---

    /// Create a document without segmenting it into paragraphs.
    pub fn create_document(&mut self, name: &str, content: &str) -> Result<i64> {
        self.db.execute(
            "INSERT INTO documents (name, content, created_at) VALUES (?1, ?2, ?3)",
            params![name, content, now_ms()],
        )?;
        Ok(self.db.last_insert_rowid())
    }

    /// Create a document and its paragraph batch in one transaction.
    ///
    /// Either the document and every paragraph appear, or nothing does.
    pub fn create_document_with_paragraphs(
        &mut self,
        name: &str,
        content: &str,
        paragraphs: &[String],
    ) -> Result<(i64, Vec<i64>)> {
        let tx = self.db.transaction()?;

        tx.execute(
            "INSERT INTO documents (name, content, created_at) VALUES (?1, ?2, ?3)",
            params![name, content, now_ms()],
        )?;
        let document_id = tx.last_insert_rowid();

        let mut paragraph_ids = Vec::with_capacity(paragraphs.len());
        for (position, text) in paragraphs.iter().enumerate() {
            tx.execute(
                "INSERT INTO paragraphs (document_id, content, position) VALUES (?1, ?2, ?3)",
                params![document_id, text, position as i64],
            )?;
            paragraph_ids.push(tx.last_insert_rowid());
        }

        tx.commit()?;
        Ok((document_id, paragraph_ids))
    }

    /// Get a document by id.
    pub fn get_document(&self, id: i64) -> Result<Document> {
        self.db
            .query_row(
                "SELECT id, name, content, created_at FROM documents WHERE id = ?1",
                [id],
                row_to_document,
            )
            .optional()?
            .ok_or_else(|| RedlineError::not_found("document", id))
    }

    // --- paragraphs ---

    /// Append a batch of paragraphs to an existing document, atomically.
    ///
    /// Positions continue from the document's current maximum, so appended
    /// paragraphs sort after everything already stored.
    pub fn create_paragraphs(&mut self, document_id: i64, texts: &[String]) -> Result<Vec<i64>> {
        self.get_document(document_id)?;

        let tx = self.db.transaction()?;

        let next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM paragraphs WHERE document_id = ?1",
            [document_id],
            |row| row.get(0),
        )?;

        let mut ids = Vec::with_capacity(texts.len());
        for (offset, text) in texts.iter().enumerate() {
            tx.execute(
                "INSERT INTO paragraphs (document_id, content, position) VALUES (?1, ?2, ?3)",
                params![document_id, text, next_position + offset as i64],
            )?;
            ids.push(tx.last_insert_rowid());
        }

        tx.commit()?;
        Ok(ids)
    }

    /// Get a paragraph by id.
    pub fn get_paragraph(&self, id: i64) -> Result<Paragraph> {
        self.db
            .query_row(
                "SELECT id, document_id, content, position FROM paragraphs WHERE id = ?1",
                [id],
                row_to_paragraph,
            )
            .optional()?
            .ok_or_else(|| RedlineError::not_found("paragraph", id))
    }

    /// List a document's paragraphs in insertion order.
    pub fn paragraphs_by_document(&self, document_id: i64) -> Result<Vec<Paragraph>> {
        let mut stmt = self.db.prepare(
            "SELECT id, document_id, content, position FROM paragraphs
             WHERE document_id = ?1 ORDER BY position, id",
        )?;
        let rows = stmt.query_map([document_id], row_to_paragraph)?;

        let mut paragraphs = Vec::new();
        for row in rows {
            paragraphs.push(row?);
        }
        Ok(paragraphs)
    }

    /// Get a paragraph with its immediate neighbors by stored order.
    pub fn paragraph_neighbors(&self, paragraph_id: i64) -> Result<Neighbors> {
        let target = self.get_paragraph(paragraph_id)?;
        let siblings = self.paragraphs_by_document(target.document_id)?;

        let index = siblings
            .iter()
            .position(|p| p.id == paragraph_id)
            .ok_or_else(|| RedlineError::not_found("paragraph", paragraph_id))?;

        let previous = if index > 0 {
            Some(siblings[index - 1].clone())
        } else {
            None
        };
        let next = siblings.get(index + 1).cloned();

        Ok(Neighbors {
            previous,
            current: siblings[index].clone(),
            next,
        })
    }

    // --- rules ---

    /// Create a compliance rule.
    pub fn create_rule(&mut self, name: &str, description: &str) -> Result<i64> {
        self.db.execute(
            "INSERT INTO compliance_rules (name, description) VALUES (?1, ?2)",
            params![name, description],
        )?;
        Ok(self.db.last_insert_rowid())
    }

    /// Create a batch of rules atomically: all rows appear or none do.
    ///
    /// Returns the persisted rules, named "Rule 1".."Rule N" by position.
    pub fn create_rules(&mut self, descriptions: &[String]) -> Result<Vec<ComplianceRule>> {
        let tx = self.db.transaction()?;

        let mut rules = Vec::with_capacity(descriptions.len());
        for (i, description) in descriptions.iter().enumerate() {
            let name = format!("Rule {}", i + 1);
            tx.execute(
                "INSERT INTO compliance_rules (name, description) VALUES (?1, ?2)",
                params![name, description],
            )?;
            rules.push(ComplianceRule {
                id: tx.last_insert_rowid(),
                name,
                description: description.clone(),
            });
        }

        tx.commit()?;
        Ok(rules)
    }

    /// Get a rule by id.
    pub fn get_rule(&self, id: i64) -> Result<ComplianceRule> {
        self.db
            .query_row(
                "SELECT id, name, description FROM compliance_rules WHERE id = ?1",
                [id],
                row_to_rule,
            )
            .optional()?
            .ok_or_else(|| RedlineError::not_found("rule", id))
    }

    /// List all rules in creation order.
    pub fn list_rules(&self) -> Result<Vec<ComplianceRule>> {
        let mut stmt = self
            .db
            .prepare("SELECT id, name, description FROM compliance_rules ORDER BY id")?;
        let rows = stmt.query_map([], row_to_rule)?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(row?);
        }
        Ok(rules)
    }

    /// Update a rule's name and description.
    pub fn update_rule(&mut self, id: i64, name: &str, description: &str) -> Result<ComplianceRule> {
        let affected = self.db.execute(
            "UPDATE compliance_rules SET name = ?1, description = ?2 WHERE id = ?3",
            params![name, description, id],
        )?;
        if affected == 0 {
            return Err(RedlineError::not_found("rule", id));
        }
        self.get_rule(id)
    }

    // --- violations ---

    /// Record a rule-check outcome for a paragraph.
    ///
    /// Repeated checks of the same (paragraph, rule) pair are legal and create
    /// additional rows; callers wanting exactly-once must not double-check.
    pub fn create_violation(
        &mut self,
        paragraph_id: i64,
        rule_id: i64,
        highlighted_text: &str,
    ) -> Result<i64> {
        self.get_paragraph(paragraph_id)?;
        self.get_rule(rule_id)?;

        self.db.execute(
            "INSERT INTO violations (paragraph_id, rule_id, highlighted_text, accepted, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![paragraph_id, rule_id, highlighted_text, now_ms()],
        )?;
        Ok(self.db.last_insert_rowid())
    }

    /// Get a violation by id.
    pub fn get_violation(&self, id: i64) -> Result<Violation> {
        self.db
            .query_row(
                "SELECT id, paragraph_id, rule_id, highlighted_text, suggested_fix, accepted, created_at
                 FROM violations WHERE id = ?1",
                [id],
                row_to_violation,
            )
            .optional()?
            .ok_or_else(|| RedlineError::not_found("violation", id))
    }

    /// Resolve a batch of violation ids, failing if any is absent.
    pub fn violations_by_ids(&self, ids: &[i64]) -> Result<Vec<Violation>> {
        let mut violations = Vec::with_capacity(ids.len());
        for &id in ids {
            violations.push(self.get_violation(id)?);
        }
        Ok(violations)
    }

    /// List all violations recorded against one paragraph, oldest first.
    pub fn violations_by_paragraph(&self, paragraph_id: i64) -> Result<Vec<Violation>> {
        let mut stmt = self.db.prepare(
            "SELECT id, paragraph_id, rule_id, highlighted_text, suggested_fix, accepted, created_at
             FROM violations WHERE paragraph_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([paragraph_id], row_to_violation)?;

        let mut violations = Vec::new();
        for row in rows {
            violations.push(row?);
        }
        Ok(violations)
    }

    /// Write the same suggestion text to every named violation, atomically.
    pub fn set_suggested_fix(&mut self, violation_ids: &[i64], text: &str) -> Result<()> {
        let tx = self.db.transaction()?;

        for &id in violation_ids {
            let affected = tx.execute(
                "UPDATE violations SET suggested_fix = ?1 WHERE id = ?2",
                params![text, id],
            )?;
            if affected == 0 {
                // tx dropped without commit, no partial updates land
                return Err(RedlineError::not_found("violation", id));
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Apply a reviewer edit: overwrite the owning paragraph's content and
    /// store the accepted flag verbatim, in one transaction.
    ///
    /// The flag is not interpreted here: `accepted = false` still overwrites
    /// the paragraph, matching the review surface's literal call semantics.
    pub fn accept_edit(&mut self, violation_id: i64, new_text: &str, accepted: bool) -> Result<()> {
        let violation = self.get_violation(violation_id)?;

        let tx = self.db.transaction()?;
        tx.execute(
            "UPDATE paragraphs SET content = ?1 WHERE id = ?2",
            params![new_text, violation.paragraph_id],
        )?;
        tx.execute(
            "UPDATE violations SET accepted = ?1 WHERE id = ?2",
            params![accepted, violation_id],
        )?;
        tx.commit()?;

        Ok(())
    }
}

fn row_to_document(row: &Row) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        name: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn row_to_paragraph(row: &Row) -> rusqlite::Result<Paragraph> {
    Ok(Paragraph {
        id: row.get(0)?,
        document_id: row.get(1)?,
        content: row.get(2)?,
        position: row.get(3)?,
    })
}

fn row_to_rule(row: &Row) -> rusqlite::Result<ComplianceRule> {
    Ok(ComplianceRule {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

fn row_to_violation(row: &Row) -> rusqlite::Result<Violation> {
    Ok(Violation {
        id: row.get(0)?,
        paragraph_id: row.get(1)?,
        rule_id: row.get(2)?,
        highlighted_text: row.get(3)?,
        suggested_fix: row.get(4)?,
        accepted: row.get(5)?,
        created_at: row.get(6)?,
    })
}
