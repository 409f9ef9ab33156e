//! `srdesk` -- command-line client for the SR-management service.
//!
//! Covers the day-to-day read paths (SR listing, wiki search, AI
//! search) plus the admin embedding tooling with live progress
//! watching.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                     | Description                |
//! |------------------------|----------|-----------------------------|----------------------------|
//! | `SRDESK_API_URL`       | no       | `http://localhost:8080/api` | Backend base URL           |
//! | `SRDESK_USERNAME`      | yes      | --                          | Login username             |
//! | `SRDESK_PASSWORD`      | yes      | --                          | Login password             |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                        | Per-request timeout (secs) |

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use srdesk_client::poll::PollEvent;
use srdesk_client::progress::{
    await_summary, request_summary, watch_bulk_embedding, watch_embedding, SummaryOutcome,
};
use srdesk_client::{ApiClient, ClientConfig};
use srdesk_core::search::AiSearchRequest;
use srdesk_core::sr::{Priority, SrFilter, SrStatus};
use srdesk_core::types::{DbId, PageQuery, ResourceType};

#[derive(Parser)]
#[command(name = "srdesk", about = "SR-management service client", version)]
struct Cli {
    #[arg(long, env = "SRDESK_USERNAME", global = true)]
    username: Option<String>,
    #[arg(long, env = "SRDESK_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify credentials against the backend.
    Login,
    /// Service Request operations.
    #[command(subcommand)]
    Sr(SrCommand),
    /// Keyword search over wiki documents.
    Wiki {
        keyword: String,
        #[arg(long, default_value_t = 0)]
        page: i64,
    },
    /// AI semantic search with a generated answer.
    Search {
        query: String,
        #[arg(long)]
        top_k: Option<i32>,
    },
    /// Embedding administration.
    #[command(subcommand)]
    Embedding(EmbeddingCommand),
    /// Fetch or generate a wiki document summary.
    Summary {
        document_id: DbId,
        /// Regenerate even when a cached summary exists.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SrCommand {
    /// List SRs with optional filters.
    List {
        #[arg(long, default_value_t = 0)]
        page: i64,
        #[arg(long, value_parser = parse_status)]
        status: Option<SrStatus>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one SR with its change history.
    Show { id: DbId },
}

#[derive(Subcommand)]
enum EmbeddingCommand {
    /// Embedding state of one wiki document.
    Status { document_id: DbId },
    /// Start async embedding generation for one wiki document.
    Generate {
        document_id: DbId,
        /// Poll progress until the job ends.
        #[arg(long)]
        watch: bool,
    },
    /// Regenerate embeddings for every resource of one type.
    Bulk {
        #[arg(value_parser = parse_resource)]
        resource: ResourceType,
        #[arg(long)]
        watch: bool,
    },
    /// Stored embedding counts per resource type.
    Stats,
}

fn parse_status(s: &str) -> Result<SrStatus, String> {
    SrStatus::from_str_value(&s.to_uppercase()).map_err(|e| e.to_string())
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_str_value(&s.to_uppercase()).map_err(|e| e.to_string())
}

fn parse_resource(s: &str) -> Result<ResourceType, String> {
    ResourceType::from_str_value(&s.to_uppercase()).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "srdesk=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    let client = ApiClient::new(&config)?;

    let username = cli.username.context("SRDESK_USERNAME is required")?;
    let password = cli.password.context("SRDESK_PASSWORD is required")?;
    let user = client.auth().login(&username, &password).await?;

    match cli.command {
        Command::Login => {
            println!("logged in as {} ({})", user.username, user.role.as_str());
        }
        Command::Sr(command) => run_sr(&client, command).await?,
        Command::Wiki { keyword, page } => {
            let result = client
                .wiki()
                .search_documents(&keyword, PageQuery::page(page))
                .await?;
            println!(
                "{} of {} documents",
                result.content.len(),
                result.total_elements
            );
            for doc in result.content {
                println!(
                    "  #{:<5} v{:<3} {}",
                    doc.id,
                    doc.current_version.unwrap_or(1),
                    doc.title
                );
            }
        }
        Command::Search { query, top_k } => {
            let mut request = AiSearchRequest::new(query);
            request.top_k = top_k;
            let response = client.ai_search().search(&request).await?;
            println!("{}", response.answer);
            if !response.sources.is_empty() {
                println!("\nsources:");
                for source in response.sources {
                    println!(
                        "  #{:<5} {:.3} {}",
                        source.document_id, source.relevance_score, source.title
                    );
                }
            }
        }
        Command::Embedding(command) => run_embedding(&client, command).await?,
        Command::Summary { document_id, force } => {
            match request_summary(&client, document_id, force).await? {
                SummaryOutcome::Ready(summary) => {
                    println!("{}", summary.summary.unwrap_or_default());
                }
                SummaryOutcome::Failed { message } => {
                    anyhow::bail!("summary failed: {message}");
                }
                SummaryOutcome::Generating(subscription) => {
                    println!("generating...");
                    let summary = await_summary(subscription).await?;
                    println!("{}", summary.summary.unwrap_or_default());
                }
            }
        }
    }

    Ok(())
}

async fn run_sr(client: &ApiClient, command: SrCommand) -> anyhow::Result<()> {
    match command {
        SrCommand::List {
            page,
            status,
            priority,
            search,
        } => {
            let filter = SrFilter {
                status,
                priority,
                search,
            };
            let result = client.sr().list(PageQuery::page(page), &filter).await?;
            println!("{} of {} SRs", result.content.len(), result.total_elements);
            for sr in result.content {
                println!(
                    "  #{:<5} [{:<11}] {:<8} {}",
                    sr.id,
                    sr.status.as_str(),
                    sr.priority.as_str(),
                    sr.title
                );
            }
        }
        SrCommand::Show { id } => {
            let sr = client.sr().get(id).await?;
            println!("{}", serde_json::to_string_pretty(&sr)?);
            let histories = client.sr().histories(id).await?;
            if !histories.is_empty() {
                println!("\nhistory:");
                for entry in histories {
                    println!(
                        "  {} {:<15} {}",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.history_type.as_str(),
                        entry.content
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_embedding(client: &ApiClient, command: EmbeddingCommand) -> anyhow::Result<()> {
    match command {
        EmbeddingCommand::Status { document_id } => {
            let status = client.ai_search().embedding_status(document_id).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        EmbeddingCommand::Generate { document_id, watch } => {
            let ack = client
                .ai_search()
                .generate_embeddings_async(document_id)
                .await?;
            println!("{ack}");
            if watch {
                let mut subscription = watch_embedding(client, document_id);
                while let Some(event) = subscription.next_event().await {
                    match event {
                        PollEvent::Progress(p) => {
                            println!(
                                "  {}% ({}/{} chunks)",
                                p.progress_percent, p.current_chunk, p.total_chunks
                            );
                        }
                        PollEvent::Completed(_) => println!("done"),
                        PollEvent::Failed { message } => anyhow::bail!("failed: {message}"),
                        PollEvent::TimedOut => anyhow::bail!("timed out"),
                    }
                }
            }
        }
        EmbeddingCommand::Bulk { resource, watch } => {
            let ack = client.ai_search().start_bulk(resource).await?;
            if let Some(message) = ack.message {
                println!("{message}");
            }
            if watch {
                let mut subscription = watch_bulk_embedding(client, resource);
                while let Some(event) = subscription.next_event().await {
                    match event {
                        PollEvent::Progress(p) => {
                            println!(
                                "  {}% ({}/{}, {} failed)",
                                p.progress_percent, p.current_index, p.total_count, p.failure_count
                            );
                        }
                        PollEvent::Completed(p) => {
                            println!("done: {} succeeded, {} failed", p.success_count, p.failure_count);
                        }
                        PollEvent::Failed { message } => anyhow::bail!("failed: {message}"),
                        PollEvent::TimedOut => anyhow::bail!("timed out"),
                    }
                }
            }
        }
        EmbeddingCommand::Stats => {
            let stats = client.ai_search().stats().await?;
            println!("wiki:   {}", stats.wiki_count);
            println!("sr:     {}", stats.sr_count);
            println!("survey: {}", stats.survey_count);
            println!("total:  {}", stats.total());
        }
    }
    Ok(())
}
