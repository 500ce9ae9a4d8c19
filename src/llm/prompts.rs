//! Prompt templates for the review operations.
//!
//! Three fixed templates: violation check, fix rewrite, and rule extraction.
//! All three produce free text; only the rule extraction output gets a
//! structured parse afterwards.

/// Prompt asking whether a paragraph violates a rule.
pub fn check_violation(rule: &str, paragraph: &str) -> String {
    format!(
        "Does the following paragraph violate the rule '{}'? \
         If so, identify the problematic text:\n\n{}",
        rule, paragraph
    )
}

/// Prompt asking for a rewrite of a paragraph that addresses all the issues
/// identified against it. `issues` is the combined highlighted text of the
/// violation batch, blank-line separated.
pub fn suggest_fix(paragraph: &str, issues: &str) -> String {
    format!(
        "Given the following issues identified in a paragraph:\n\n{}\n\n\
         Here is the original paragraph:\n\n{}\n\n\
         Rewrite the paragraph to address all the issues above. \
         Return only the improved version of the paragraph.",
        issues, paragraph
    )
}

/// Prompt asking for compliance rules extracted from a policy document,
/// one rule per line.
pub fn generate_rules(document: &str) -> String {
    format!(
        "You are a compliance officer. Given the following policy document or guideline, \
         extract a concise list of explicit compliance rules. \
         Each rule should be clear, actionable, and self-contained. \
         Only return the rules, no other text. Return the rules as a list (one per line).\n\n\
         Document:\n{}\n\nCompliance Rules:",
        document
    )
}
