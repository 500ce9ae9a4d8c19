use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::{Commands, RuleCommands};
use redline::config::Config;
use redline::llm::{ChatClient, LlmClient, UnavailableClient};
use redline::store::{ComplianceStore, Paragraph, Violation};
use redline::workflow::{ReviewCursor, ReviewWorkflow};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redline")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("redline.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn open_workflow(config: &Config) -> Result<ReviewWorkflow> {
    let db_path = config.db_path()?;
    let store = ComplianceStore::open(&db_path)
        .context(format!("Failed to open store at {}", db_path.display()))?;

    // Store-only commands must keep working without a configured gateway
    let client: Arc<dyn LlmClient> = match ChatClient::new(&config.llm) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::debug!("LLM gateway not configured: {}", e);
            Arc::new(UnavailableClient::new(e.to_string()))
        }
    };

    Ok(ReviewWorkflow::new(store, client))
}

fn document_name(file: &Path, name: Option<String>) -> String {
    name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    })
}

fn print_paragraph(paragraph: &Paragraph) {
    println!(
        "  {} {}",
        format!("[{}]", paragraph.id).cyan(),
        paragraph.content
    );
}

fn print_violation(violation: &Violation) {
    let status = if violation.accepted {
        "accepted".green()
    } else {
        "open".yellow()
    };
    println!(
        "  {} rule {} ({})",
        format!("[{}]", violation.id).cyan(),
        violation.rule_id,
        status
    );
    println!("      {}", violation.highlighted_text);
    if let Some(fix) = &violation.suggested_fix {
        println!("      {} {}", "fix:".magenta(), fix);
    }
}

async fn run_application(cli: Cli, config: &Config) -> Result<()> {
    let mut workflow = open_workflow(config)?;

    match cli.command {
        Commands::Upload { file, name, rules_only } => {
            let content = fs::read_to_string(&file)
                .context(format!("Failed to read {}", file.display()))?;
            let name = document_name(&file, name);

            if rules_only {
                let document_id = workflow.upload_for_rules(&name, &content)?;
                println!("{} document {}", "Uploaded:".green(), document_id);
            } else {
                let outcome = workflow.upload_for_checking(&name, &content)?;
                println!(
                    "{} document {} ({} paragraphs)",
                    "Uploaded:".green(),
                    outcome.document_id,
                    outcome.paragraph_ids.len()
                );
            }
        }

        Commands::Paragraphs { document_id } => {
            let paragraphs = workflow.paragraphs(document_id)?;
            println!("{} {} paragraph(s)", "Document:".green(), paragraphs.len());
            for paragraph in &paragraphs {
                print_paragraph(paragraph);
            }
        }

        Commands::Neighbors { paragraph_id } => {
            let neighbors = workflow.neighbors(paragraph_id)?;
            match &neighbors.previous {
                Some(p) => {
                    print!("{}", "prev".yellow());
                    print_paragraph(p);
                }
                None => println!("{} (start of document)", "prev".yellow()),
            }
            print!("{}", "here".green());
            print_paragraph(&neighbors.current);
            match &neighbors.next {
                Some(p) => {
                    print!("{}", "next".yellow());
                    print_paragraph(p);
                }
                None => println!("{} (end of document)", "next".yellow()),
            }
        }

        Commands::Violations { paragraph_id } => {
            let violations = workflow.violations(paragraph_id)?;
            println!("{} {} violation(s)", "Paragraph:".green(), violations.len());
            for violation in &violations {
                print_violation(violation);
            }
        }

        Commands::Rules { command } => run_rule_command(command, &mut workflow).await?,

        Commands::Check { rule_id, paragraph_id } => {
            let outcome = workflow.check_violation(rule_id, paragraph_id).await?;
            println!("{} violation {}", "Checked:".green(), outcome.violation_id);
            println!("{}", outcome.highlighted_text);
        }

        Commands::Suggest { violation_ids } => {
            let suggestion = workflow.suggest_fix(&violation_ids).await?;
            println!("{}", "Suggested fix:".green());
            println!("{}", suggestion);
        }

        Commands::Accept { violation_id, new_text, reject } => {
            workflow.accept_edit(violation_id, &new_text, !reject)?;
            let verb = if reject { "Recorded (not accepted):" } else { "Accepted:" };
            println!("{} violation {}", verb.green(), violation_id);
        }

        Commands::Review { document_id } => {
            let mut cursor = Some(ReviewCursor::start(document_id));
            while let Some(current) = cursor {
                let Some(paragraph) = current.current(workflow.store())? else {
                    break;
                };
                println!("{}", format!("--- paragraph {} ---", current.position + 1).bold());
                print_paragraph(&paragraph);
                for violation in &workflow.violations(paragraph.id)? {
                    print_violation(violation);
                }
                cursor = current.advance(workflow.store())?;
            }
        }

        Commands::Query { prompt } => {
            let answer = workflow.general_query(&prompt).await?;
            println!("{}", answer);
        }
    }

    Ok(())
}

async fn run_rule_command(command: RuleCommands, workflow: &mut ReviewWorkflow) -> Result<()> {
    match command {
        RuleCommands::Generate { file } => {
            let text = fs::read_to_string(&file)
                .context(format!("Failed to read {}", file.display()))?;
            let rules = workflow.generate_rules(&text).await?;
            println!("{} {} rule(s)", "Generated:".green(), rules.len());
            for rule in &rules {
                println!("  {} {}: {}", format!("[{}]", rule.id).cyan(), rule.name, rule.description);
            }
        }
        RuleCommands::List => {
            for rule in &workflow.list_rules()? {
                println!("  {} {}: {}", format!("[{}]", rule.id).cyan(), rule.name, rule.description);
            }
        }
        RuleCommands::Show { id } => {
            let rule = workflow.get_rule(id)?;
            println!("{} {}", "Name:".green(), rule.name);
            println!("{} {}", "Description:".green(), rule.description);
        }
        RuleCommands::Add { name, description } => {
            let rule = workflow.add_rule(&name, &description)?;
            println!("{} rule {}", "Added:".green(), rule.id);
        }
        RuleCommands::Update { id, name, description } => {
            let rule = workflow.update_rule(id, &name, &description)?;
            println!("{} rule {}: {}", "Updated:".green(), rule.id, rule.description);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(cli, &config).await.context("Command failed")?;

    Ok(())
}
