//! Review workflow orchestration.
//!
//! Walks the paragraph review state machine: upload segments a document into
//! paragraphs, checks attach gateway-produced violation annotations, suggest
//! writes one combined fix across a violation batch, and accept applies the
//! reviewer's edit to the stored paragraph.
//!
//! The workflow is stateless between calls. Review progress is a value owned
//! by the caller ([`ReviewCursor`]), not process state. Gateway calls always
//! happen before any write for that operation, so an upstream failure leaves
//! the store untouched.

mod review;

pub use review::ReviewCursor;

use std::sync::Arc;

use crate::error::{RedlineError, Result};
use crate::llm::{LlmClient, parse_rule_lines, prompts};
use crate::segment::segment;
use crate::store::{ComplianceRule, ComplianceStore, Document, Neighbors, Paragraph, Violation};

/// Result of uploading a document for checking.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub document_id: i64,
    pub paragraph_ids: Vec<i64>,
}

/// Result of checking one paragraph against one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub violation_id: i64,
    pub highlighted_text: String,
}

/// Orchestrates the review loop over a store and an LLM gateway.
pub struct ReviewWorkflow {
    store: ComplianceStore,
    client: Arc<dyn LlmClient>,
}

impl ReviewWorkflow {
    pub fn new(store: ComplianceStore, client: Arc<dyn LlmClient>) -> Self {
        Self { store, client }
    }

    // --- upload ---

    /// Upload a document and segment it into paragraphs for review.
    ///
    /// The document and its whole paragraph batch land atomically.
    pub fn upload_for_checking(&mut self, name: &str, content: &str) -> Result<UploadOutcome> {
        let paragraphs = segment(content);
        log::info!(
            "Uploading '{}' for checking: {} paragraphs",
            name,
            paragraphs.len()
        );

        let (document_id, paragraph_ids) =
            self.store
                .create_document_with_paragraphs(name, content, &paragraphs)?;

        Ok(UploadOutcome {
            document_id,
            paragraph_ids,
        })
    }

    /// Upload a document as rule-generation source material, without
    /// segmenting it.
    pub fn upload_for_rules(&mut self, name: &str, content: &str) -> Result<i64> {
        log::info!("Uploading '{}' for rule generation", name);
        self.store.create_document(name, content)
    }

    // --- checks and fixes ---

    /// Check one paragraph against one rule.
    ///
    /// Always creates a new violation row; repeated checks of the same pair
    /// are legal and not deduplicated.
    pub async fn check_violation(&mut self, rule_id: i64, paragraph_id: i64) -> Result<CheckOutcome> {
        let rule = self.store.get_rule(rule_id)?;
        let paragraph = self.store.get_paragraph(paragraph_id)?;

        let prompt = prompts::check_violation(&rule.description, &paragraph.content);
        let highlighted_text = self.client.complete(&prompt).await?;

        let violation_id =
            self.store
                .create_violation(paragraph_id, rule_id, &highlighted_text)?;
        log::info!(
            "Checked paragraph {} against rule {}: violation {}",
            paragraph_id,
            rule_id,
            violation_id
        );

        Ok(CheckOutcome {
            violation_id,
            highlighted_text,
        })
    }

    /// Ask for one combined rewrite addressing every violation in the batch,
    /// and store it on all of them.
    ///
    /// The batch must be non-empty and every id must exist. All violations
    /// are expected to belong to the same paragraph; the first one's owner is
    /// used as the rewrite subject. The suggestion is written to all rows in
    /// one transaction, after the gateway call succeeds.
    pub async fn suggest_fix(&mut self, violation_ids: &[i64]) -> Result<String> {
        if violation_ids.is_empty() {
            return Err(RedlineError::InvalidArgument(
                "no violation ids provided".to_string(),
            ));
        }

        let violations = self.store.violations_by_ids(violation_ids)?;
        let paragraph = self.store.get_paragraph(violations[0].paragraph_id)?;

        let issues: Vec<&str> = violations
            .iter()
            .map(|v| v.highlighted_text.as_str())
            .collect();
        let prompt = prompts::suggest_fix(&paragraph.content, &issues.join("\n\n"));
        let suggestion = self.client.complete(&prompt).await?;

        self.store.set_suggested_fix(violation_ids, &suggestion)?;
        log::info!(
            "Suggested fix for {} violation(s) on paragraph {}",
            violation_ids.len(),
            paragraph.id
        );

        Ok(suggestion)
    }

    /// Apply a reviewer edit: overwrite the owning paragraph's content with
    /// `new_text` and store the accepted flag verbatim.
    pub fn accept_edit(&mut self, violation_id: i64, new_text: &str, accepted: bool) -> Result<()> {
        self.store.accept_edit(violation_id, new_text, accepted)?;
        log::info!("Edit applied via violation {} (accepted={})", violation_id, accepted);
        Ok(())
    }

    // --- rules ---

    /// Extract compliance rules from source text and persist them.
    ///
    /// The raw gateway output is parsed one rule per non-blank line; the
    /// whole batch lands atomically. Returns the persisted rules.
    pub async fn generate_rules(&mut self, source_text: &str) -> Result<Vec<ComplianceRule>> {
        let prompt = prompts::generate_rules(source_text);
        let raw = self.client.complete(&prompt).await?;
        let descriptions = parse_rule_lines(&raw)?;

        let rules = self.store.create_rules(&descriptions)?;
        log::info!("Generated {} rules", rules.len());
        Ok(rules)
    }

    /// Create a rule by manual entry.
    pub fn add_rule(&mut self, name: &str, description: &str) -> Result<ComplianceRule> {
        let id = self.store.create_rule(name, description)?;
        self.store.get_rule(id)
    }

    pub fn get_rule(&self, id: i64) -> Result<ComplianceRule> {
        self.store.get_rule(id)
    }

    pub fn list_rules(&self) -> Result<Vec<ComplianceRule>> {
        self.store.list_rules()
    }

    pub fn update_rule(&mut self, id: i64, name: &str, description: &str) -> Result<ComplianceRule> {
        self.store.update_rule(id, name, description)
    }

    // --- queries ---

    /// Passthrough to the gateway with no persistence.
    pub async fn general_query(&self, prompt: &str) -> Result<String> {
        self.client.complete(prompt).await
    }

    pub fn get_document(&self, id: i64) -> Result<Document> {
        self.store.get_document(id)
    }

    pub fn paragraphs(&self, document_id: i64) -> Result<Vec<Paragraph>> {
        self.store.paragraphs_by_document(document_id)
    }

    pub fn neighbors(&self, paragraph_id: i64) -> Result<Neighbors> {
        self.store.paragraph_neighbors(paragraph_id)
    }

    pub fn violations(&self, paragraph_id: i64) -> Result<Vec<Violation>> {
        self.store.violations_by_paragraph(paragraph_id)
    }

    pub fn get_violation(&self, violation_id: i64) -> Result<Violation> {
        self.store.get_violation(violation_id)
    }

    /// Borrow the underlying store, for cursor movement.
    pub fn store(&self) -> &ComplianceStore {
        &self.store
    }
}
