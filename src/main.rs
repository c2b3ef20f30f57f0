mod answer;
mod crawler;
mod db;
mod fetch;
mod ledger;
mod output;
mod parser;
mod sanitize;

use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "policy_crawler", about = "Seoul youth policy portal crawler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl listings, fetch new policy details, persist results
    Run {
        /// Safety cap on listing pages fetched
        #[arg(short = 'n', long, default_value_t = crawler::DEFAULT_MAX_PAGES)]
        max_pages: u32,
    },
    /// Show stored-policy statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    // A bare invocation runs the full pipeline.
    let command = cli.command.unwrap_or(Commands::Run {
        max_pages: crawler::DEFAULT_MAX_PAGES,
    });

    let result = match command {
        Commands::Run { max_pages } => run(max_pages).await,
        Commands::Stats => stats(),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run(max_pages: u32) -> anyhow::Result<()> {
    let conn = db::connect()?;
    db::init_schema(&conn)?;

    let mut saved_ids =
        ledger::load_saved_policy_ids(&[crawler::FILE1_PATH, crawler::FILE3_PATH])?;
    println!("{} policies already saved in output files", saved_ids.len());

    let client = reqwest::Client::new();
    let policies = crawler::crawl_policy_pages(&client, max_pages, fetch::list_url).await?;
    println!("Collected {} policies from listings", policies.len());
    if policies.is_empty() {
        return Ok(());
    }

    let stats = crawler::process_policies(
        &client,
        &conn,
        &policies,
        &mut saved_ids,
        fetch::detail_url,
        crawler::FILE1_PATH,
        crawler::FILE3_PATH,
    )
    .await?;
    println!(
        "Processed {} of {} listed policies ({} inserted, {} DB duplicates, {} errors).",
        stats.processed, stats.listed, stats.inserted, stats.duplicates, stats.errors
    );
    Ok(())
}

fn stats() -> anyhow::Result<()> {
    let conn = db::connect()?;
    db::init_schema(&conn)?;
    let saved = ledger::load_saved_policy_ids(&[crawler::FILE1_PATH, crawler::FILE3_PATH])?;
    println!("Stored in DB:    {}", db::count_policies(&conn)?);
    println!("In output files: {}", saved.len());
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
