use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{self, InsertOutcome};
use crate::fetch;
use crate::output;
use crate::parser::detail;
use crate::parser::list::{self, PolicyItem};

pub const FILE1_PATH: &str = "data/policy_log.txt";
pub const FILE3_PATH: &str = "data/policy_answers.txt";

/// Safety cap on listing pages per run; the portal signals the real end
/// with an empty page.
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// The fixed question set answered for every policy.
pub const QUESTIONS: [&str; 5] = [
    "사업개요에 대해 알려줘",
    "신청자격은 어떻게 되나요?",
    "신청방법이 궁금해요",
    "기타 정보가 있나요?",
    "지원 내용이 뭔가요?",
];

pub struct CrawlStats {
    pub listed: usize,
    pub processed: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub errors: usize,
}

/// Walk the listing endpoint page by page until an empty page (or the
/// safety cap) stops the crawl. Items accumulate in page order.
/// `list_url` builds the URL for a given page index.
pub async fn crawl_policy_pages(
    client: &reqwest::Client,
    max_pages: u32,
    list_url: impl Fn(u32) -> String,
) -> Result<Vec<PolicyItem>> {
    let mut all = Vec::new();
    for page in 1..=max_pages {
        let html = fetch::fetch_page(client, &list_url(page)).await?;
        let items = list::parse_policy_list(&html);
        if items.is_empty() {
            info!("Listing page {} is empty, stopping pagination", page);
            return Ok(all);
        }
        info!("Page {}: {} policies", page, items.len());
        all.extend(items);
    }
    warn!(
        "Hit the {}-page safety cap before an empty listing page",
        max_pages
    );
    Ok(all)
}

/// Process crawled policies one at a time: fetch the detail page, persist
/// title/URL and question answers, and record the id in the dedup set.
/// A failure on one policy is logged and skipped; the run continues.
/// `detail_url` builds the URL for a given policy id; `file1`/`file3` are
/// the two output files.
pub async fn process_policies(
    client: &reqwest::Client,
    conn: &Connection,
    policies: &[PolicyItem],
    saved_ids: &mut HashSet<String>,
    detail_url: impl Fn(&str) -> String,
    file1: impl AsRef<Path>,
    file3: impl AsRef<Path>,
) -> Result<CrawlStats> {
    let mut stats = CrawlStats {
        listed: policies.len(),
        processed: 0,
        inserted: 0,
        duplicates: 0,
        errors: 0,
    };

    let pb = ProgressBar::new(policies.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    for policy in policies {
        pb.inc(1);
        if !should_process(policy, saved_ids) {
            continue;
        }
        info!("Processing [{}] {}", policy.category, policy.title);
        debug!(
            "{} {:?}: {}",
            policy.policy_id, policy.link_classes, policy.description
        );
        let outcome = process_one(
            client,
            conn,
            policy,
            &mut stats,
            &detail_url,
            file1.as_ref(),
            file3.as_ref(),
        )
        .await;
        match outcome {
            Ok(()) => {
                saved_ids.insert(policy.policy_id.clone());
                stats.processed += 1;
            }
            Err(e) => {
                warn!("Failed to process policy {}: {}", policy.policy_id, e);
                stats.errors += 1;
            }
        }
    }

    pb.finish_and_clear();
    Ok(stats)
}

/// Policies without an id are unaddressable; ids already in the ledger
/// were persisted by an earlier run (or earlier in this one).
fn should_process(policy: &PolicyItem, saved_ids: &HashSet<String>) -> bool {
    if policy.policy_id.is_empty() {
        return false;
    }
    if saved_ids.contains(&policy.policy_id) {
        info!("Skipping {}: already saved", policy.policy_id);
        return false;
    }
    true
}

async fn process_one(
    client: &reqwest::Client,
    conn: &Connection,
    policy: &PolicyItem,
    stats: &mut CrawlStats,
    detail_url: &impl Fn(&str) -> String,
    file1: &Path,
    file3: &Path,
) -> Result<()> {
    let url = detail_url(&policy.policy_id);
    let html = fetch::fetch_page(client, &url).await?;
    let page = detail::parse_detail(&html)?;

    output::append_policy_entry(file1, &page.title, &url)?;

    match db::insert_policy(conn, &page.title, &url) {
        InsertOutcome::Inserted => {
            stats.inserted += 1;
            info!("Inserted {}", page.title);
        }
        InsertOutcome::DuplicateSkipped => {
            stats.duplicates += 1;
            info!("Already in DB, skipped: {}", page.title);
        }
        InsertOutcome::Failed(reason) => {
            warn!("DB insert failed for {}: {}", page.title, reason);
        }
    }

    output::append_policy_answers(file3, &page.title, &QUESTIONS, &page.sections)?;
    Ok(())
}

// ── Tests ──
