//! End-to-end review workflow integration tests
//!
//! Exercises the full upload/check/suggest/accept loop against an on-disk
//! store and a mock LLM client.

use std::sync::Arc;

use redline::error::{RedlineError, Result};
use redline::llm::MockLlmClient;
use redline::segment::segment;
use redline::store::ComplianceStore;
use redline::workflow::{ReviewCursor, ReviewWorkflow};
use tempfile::TempDir;

fn open_workflow(dir: &TempDir, responses: Vec<&str>) -> Result<ReviewWorkflow> {
    let store = ComplianceStore::open(&dir.path().join("redline.db"))?;
    Ok(ReviewWorkflow::new(
        store,
        Arc::new(MockLlmClient::with_responses(responses)),
    ))
}

/// Upload splits on lines, assigns ids in order, and neighbor lookups see the
/// stored order.
#[test]
fn test_upload_and_neighbors_end_to_end() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut workflow = open_workflow(&dir, vec![])?;

    let content = "All data must be encrypted.\nShare passwords by email.";
    assert_eq!(
        segment(content),
        vec!["All data must be encrypted.", "Share passwords by email."]
    );

    let outcome = workflow.upload_for_checking("policy", content)?;
    assert_eq!(outcome.paragraph_ids.len(), 2);

    let neighbors = workflow.neighbors(outcome.paragraph_ids[1])?;
    assert_eq!(neighbors.previous.unwrap().id, outcome.paragraph_ids[0]);
    assert_eq!(neighbors.current.content, "Share passwords by email.");
    assert!(neighbors.next.is_none());

    Ok(())
}

/// Rule generation against a stubbed gateway persists exactly one rule per
/// non-blank response line.
#[tokio::test]
async fn test_generate_rules_end_to_end() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut workflow = open_workflow(&dir, vec!["Rule A.\nRule B."])?;

    let rules = workflow.generate_rules("Rule A.\nRule B.\n").await?;
    assert_eq!(rules.len(), 2);

    let stored = workflow.list_rules()?;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].description, "Rule A.");
    assert_eq!(stored[1].description, "Rule B.");

    Ok(())
}

/// Full loop: check flags a paragraph, suggest writes one shared fix, accept
/// overwrites the paragraph and marks the violation, and the edit survives a
/// store reopen.
#[tokio::test]
async fn test_full_review_loop_persists() -> Result<()> {
    let dir = TempDir::new().unwrap();

    let (document_id, paragraph_id) = {
        let mut workflow = open_workflow(
            &dir,
            vec!["'passwords by email' violates the rule", "Never share passwords."],
        )?;

        let upload = workflow.upload_for_checking("policy", "Share passwords by email.")?;
        let rule = workflow.add_rule("Rule 1", "No passwords by email")?;
        let paragraph_id = upload.paragraph_ids[0];

        let check = workflow.check_violation(rule.id, paragraph_id).await?;
        let suggestion = workflow.suggest_fix(&[check.violation_id]).await?;
        assert_eq!(suggestion, "Never share passwords.");

        // Reviewer accepts the suggestion verbatim
        workflow.accept_edit(check.violation_id, &suggestion, true)?;

        let paragraphs = workflow.paragraphs(upload.document_id)?;
        assert_eq!(paragraphs[0].content, "Never share passwords.");
        assert!(workflow.get_violation(check.violation_id)?.accepted);

        (upload.document_id, paragraph_id)
    };

    // Reopen and verify the accepted edit persisted
    let store = ComplianceStore::open(&dir.path().join("redline.db"))?;
    let paragraphs = store.paragraphs_by_document(document_id)?;
    assert_eq!(paragraphs[0].content, "Never share passwords.");
    assert_eq!(paragraphs[0].id, paragraph_id);

    Ok(())
}

/// The review cursor walks the document in order and resumes from a
/// serialized position.
#[test]
fn test_cursor_resume_across_sessions() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut workflow = open_workflow(&dir, vec![])?;

    let upload = workflow.upload_for_checking("doc", "a\nb\nc")?;
    let cursor = ReviewCursor::start(upload.document_id)
        .advance(workflow.store())?
        .unwrap();

    let saved = serde_json::to_string(&cursor).unwrap();

    // A later session resumes where the first left off
    let workflow = open_workflow(&dir, vec![])?;
    let resumed: ReviewCursor = serde_json::from_str(&saved).unwrap();
    assert_eq!(resumed.current(workflow.store())?.unwrap().content, "b");
    let next = resumed.advance(workflow.store())?.unwrap();
    assert_eq!(next.current(workflow.store())?.unwrap().content, "c");

    Ok(())
}

/// Upstream failures surface as-is and leave the store untouched.
#[tokio::test]
async fn test_upstream_failure_leaves_state_clean() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let store = ComplianceStore::open(&dir.path().join("redline.db"))?;
    let mut workflow = ReviewWorkflow::new(store, Arc::new(MockLlmClient::failing()));

    let upload = workflow.upload_for_checking("doc", "some text")?;
    let rule = workflow.add_rule("Rule 1", "desc")?;

    let err = workflow
        .check_violation(rule.id, upload.paragraph_ids[0])
        .await
        .unwrap_err();
    assert!(matches!(err, RedlineError::Upstream(_)));
    assert!(workflow.violations(upload.paragraph_ids[0])?.is_empty());

    let err = workflow.generate_rules("text").await.unwrap_err();
    assert!(matches!(err, RedlineError::Upstream(_)));
    assert_eq!(workflow.list_rules()?.len(), 1);

    Ok(())
}
