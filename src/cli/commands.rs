//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - upload: ingest a document for checking or as rule source
//! - rules: generate/list/show/add/update compliance rules
//! - check/suggest/accept: the per-paragraph review operations
//! - review: walk a document paragraph by paragraph

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Redline - document compliance review
#[derive(Parser, Debug)]
#[command(name = "redline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a document: segment it into paragraphs for checking,
    /// or store it whole as rule-generation source
    Upload {
        /// Path to the document text file
        file: PathBuf,

        /// Document name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Store the document without splitting it into paragraphs
        #[arg(long)]
        rules_only: bool,
    },

    /// List a document's paragraphs in review order
    Paragraphs {
        /// Document ID
        document_id: i64,
    },

    /// Show a paragraph with its previous and next siblings
    Neighbors {
        /// Paragraph ID
        paragraph_id: i64,
    },

    /// List violations recorded against a paragraph
    Violations {
        /// Paragraph ID
        paragraph_id: i64,
    },

    /// Compliance rule management
    Rules {
        #[command(subcommand)]
        command: RuleCommands,
    },

    /// Check one paragraph against one rule
    Check {
        /// Rule ID
        rule_id: i64,

        /// Paragraph ID
        paragraph_id: i64,
    },

    /// Ask for one combined fix across a batch of violations
    Suggest {
        /// Violation IDs (all against the same paragraph)
        #[arg(required = true)]
        violation_ids: Vec<i64>,
    },

    /// Apply a reviewer edit to the violation's paragraph
    Accept {
        /// Violation ID
        violation_id: i64,

        /// Replacement paragraph text (may differ from the suggestion)
        new_text: String,

        /// Record the edit without marking the violation accepted
        #[arg(long)]
        reject: bool,
    },

    /// Walk a document's paragraphs with their violations
    Review {
        /// Document ID
        document_id: i64,
    },

    /// Send a free-form prompt to the gateway, no persistence
    Query {
        /// Prompt text
        prompt: String,
    },
}

/// Rule management subcommands
#[derive(Subcommand, Debug)]
pub enum RuleCommands {
    /// Extract and persist rules from a policy document
    Generate {
        /// Path to the policy text file
        file: PathBuf,
    },

    /// List all rules
    List,

    /// Show one rule
    Show {
        /// Rule ID
        id: i64,
    },

    /// Add a rule by manual entry
    Add {
        /// Rule name
        name: String,

        /// Rule description
        description: String,
    },

    /// Update a rule's name and description
    Update {
        /// Rule ID
        id: i64,

        /// New name
        name: String,

        /// New description
        description: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_upload_command() {
        let cli = Cli::try_parse_from(["redline", "upload", "policy.txt"]).unwrap();
        match cli.command {
            Commands::Upload { file, name, rules_only } => {
                assert_eq!(file, PathBuf::from("policy.txt"));
                assert!(name.is_none());
                assert!(!rules_only);
            }
            _ => panic!("Expected upload command"),
        }
    }

    #[test]
    fn test_upload_rules_only() {
        let cli =
            Cli::try_parse_from(["redline", "upload", "policy.txt", "--rules-only", "-n", "hr"])
                .unwrap();
        match cli.command {
            Commands::Upload { name, rules_only, .. } => {
                assert_eq!(name, Some("hr".to_string()));
                assert!(rules_only);
            }
            _ => panic!("Expected upload command"),
        }
    }

    #[test]
    fn test_paragraphs_command() {
        let cli = Cli::try_parse_from(["redline", "paragraphs", "3"]).unwrap();
        match cli.command {
            Commands::Paragraphs { document_id } => assert_eq!(document_id, 3),
            _ => panic!("Expected paragraphs command"),
        }
    }

    #[test]
    fn test_neighbors_command() {
        let cli = Cli::try_parse_from(["redline", "neighbors", "7"]).unwrap();
        match cli.command {
            Commands::Neighbors { paragraph_id } => assert_eq!(paragraph_id, 7),
            _ => panic!("Expected neighbors command"),
        }
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::try_parse_from(["redline", "check", "1", "2"]).unwrap();
        match cli.command {
            Commands::Check { rule_id, paragraph_id } => {
                assert_eq!(rule_id, 1);
                assert_eq!(paragraph_id, 2);
            }
            _ => panic!("Expected check command"),
        }
    }

    #[test]
    fn test_suggest_requires_ids() {
        assert!(Cli::try_parse_from(["redline", "suggest"]).is_err());

        let cli = Cli::try_parse_from(["redline", "suggest", "4", "5"]).unwrap();
        match cli.command {
            Commands::Suggest { violation_ids } => assert_eq!(violation_ids, vec![4, 5]),
            _ => panic!("Expected suggest command"),
        }
    }

    #[test]
    fn test_accept_command() {
        let cli = Cli::try_parse_from(["redline", "accept", "9", "new text"]).unwrap();
        match cli.command {
            Commands::Accept { violation_id, new_text, reject } => {
                assert_eq!(violation_id, 9);
                assert_eq!(new_text, "new text");
                assert!(!reject);
            }
            _ => panic!("Expected accept command"),
        }
    }

    #[test]
    fn test_accept_reject_flag() {
        let cli = Cli::try_parse_from(["redline", "accept", "9", "text", "--reject"]).unwrap();
        match cli.command {
            Commands::Accept { reject, .. } => assert!(reject),
            _ => panic!("Expected accept command"),
        }
    }

    #[test]
    fn test_rules_generate() {
        let cli = Cli::try_parse_from(["redline", "rules", "generate", "policy.txt"]).unwrap();
        match cli.command {
            Commands::Rules {
                command: RuleCommands::Generate { file },
            } => assert_eq!(file, PathBuf::from("policy.txt")),
            _ => panic!("Expected rules generate command"),
        }
    }

    #[test]
    fn test_rules_update() {
        let cli = Cli::try_parse_from(["redline", "rules", "update", "2", "Rule 2", "New text"])
            .unwrap();
        match cli.command {
            Commands::Rules {
                command: RuleCommands::Update { id, name, description },
            } => {
                assert_eq!(id, 2);
                assert_eq!(name, "Rule 2");
                assert_eq!(description, "New text");
            }
            _ => panic!("Expected rules update command"),
        }
    }

    #[test]
    fn test_query_command() {
        let cli = Cli::try_parse_from(["redline", "query", "hello"]).unwrap();
        match cli.command {
            Commands::Query { prompt } => assert_eq!(prompt, "hello"),
            _ => panic!("Expected query command"),
        }
    }

    #[test]
    fn test_review_command() {
        let cli = Cli::try_parse_from(["redline", "review", "1"]).unwrap();
        match cli.command {
            Commands::Review { document_id } => assert_eq!(document_id, 1),
            _ => panic!("Expected review command"),
        }
    }

    #[test]
    fn test_config_option() {
        let cli = Cli::try_parse_from(["redline", "-c", "/path/redline.yml", "rules", "list"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/redline.yml")));
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }
}
