//! Cadence command line.
//!
//! Three subcommands mirror the three stages of the reporting flow:
//!
//! - `generate` resolves a milestone row, synthesizes an update, and prints
//!   it for review without touching the tracker
//! - `post` publishes reviewed text as a Jira comment
//! - `write-summary` writes a leadership summary into a track's summary cell
//!
//! Errors print through `anyhow` and exit non-zero; nothing is retried.

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cadence_core::{Table, resolve, validate_schema, write_summary};
use cadence_google::{DocsConfig, GoogleDocs, SheetsConfig, SheetsTable};
use cadence_jira::{JiraClient, JiraConfig};
use cadence_llm::{AnthropicClient, AnthropicConfig, build_prompt, fetch_notes, parse_reply};
use cadence_settings::Settings;

#[derive(Parser)]
#[command(name = "cadence", version, about = "Tracker status-update engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a milestone row and print a generated update as JSON.
    Generate {
        /// Spreadsheet identifier.
        sheet_id: String,
        /// 1-based row index of the milestone.
        row: u32,
    },
    /// Post reviewed update text as a comment on a Jira issue.
    Post {
        /// Jira issue key, e.g. `PROJ-123`.
        jira_id: String,
        /// Comment text to publish.
        comment: String,
    },
    /// Write a leadership summary into a track's summary cell.
    WriteSummary {
        /// Spreadsheet identifier.
        sheet_id: String,
        /// Track description to match (case-insensitive).
        track: String,
        /// Summary text to write.
        summary: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("loading configuration")?;
    let http = reqwest::Client::new();

    match cli.command {
        Command::Generate { sheet_id, row } => generate(&settings, &http, &sheet_id, row).await,
        Command::Post { jira_id, comment } => post(&settings, &http, &jira_id, &comment).await,
        Command::WriteSummary {
            sheet_id,
            track,
            summary,
        } => summarize(&settings, &http, &sheet_id, &track, &summary).await,
    }
}

fn sheet_table(
    settings: &Settings,
    http: &reqwest::Client,
    sheet_id: &str,
) -> anyhow::Result<SheetsTable> {
    Ok(SheetsTable::with_client(
        SheetsConfig {
            base_url: settings.google.sheets_base_url.clone(),
            access_token: settings.google.access_token()?.to_string(),
            spreadsheet_id: sheet_id.to_string(),
            range: settings.google.range.clone(),
        },
        http.clone(),
    ))
}

async fn generate(
    settings: &Settings,
    http: &reqwest::Client,
    sheet_id: &str,
    row: u32,
) -> anyhow::Result<()> {
    let table = sheet_table(settings, http, sheet_id)?;

    let headers = table.headers().await.context("reading sheet headers")?;
    let missing = validate_schema(&headers);
    if !missing.is_empty() {
        bail!("sheet is missing required columns: {}", missing.join(", "));
    }

    let context = resolve(&table, row).await.context("resolving milestone")?;
    info!(
        milestone = %context.milestone.name,
        track = %context.track_name,
        "context resolved"
    );

    let docs = GoogleDocs::with_client(
        DocsConfig {
            base_url: settings.google.docs_base_url.clone(),
            access_token: settings.google.access_token()?.to_string(),
        },
        http.clone(),
    );
    let notes = fetch_notes(&docs, &context.notes_link).await;

    let llm = AnthropicClient::with_client(
        AnthropicConfig {
            api_key: settings.anthropic.api_key.clone(),
            model: settings.anthropic.model.clone(),
            base_url: settings.anthropic.base_url.clone(),
        },
        http.clone(),
    );
    let prompt = build_prompt(&context, &notes);
    let raw = llm.complete(&prompt).await.context("requesting completion")?;
    let update = parse_reply(&raw)?;

    let preview = serde_json::json!({
        "track": context.track_name,
        "workstream": context.workstream_name,
        "milestone": context.milestone.name,
        "jira_id": context.milestone.jira_id,
        "update": update,
    });
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

async fn post(
    settings: &Settings,
    http: &reqwest::Client,
    jira_id: &str,
    comment: &str,
) -> anyhow::Result<()> {
    let jira = JiraClient::with_client(
        JiraConfig {
            base_url: settings.jira.base_url.clone(),
            email: settings.jira.email.clone(),
            api_token: settings.jira.api_token.clone(),
        },
        http.clone(),
    );
    let receipt = jira.post_comment(jira_id, comment).await?;
    info!(issue = jira_id, comment_id = %receipt.id, "comment published");
    println!("posted comment {} on {jira_id}", receipt.id);
    Ok(())
}

async fn summarize(
    settings: &Settings,
    http: &reqwest::Client,
    sheet_id: &str,
    track: &str,
    summary: &str,
) -> anyhow::Result<()> {
    let table = sheet_table(settings, http, sheet_id)?;
    write_summary(&table, track, summary).await?;
    println!("summary written for track {track}");
    Ok(())
}
