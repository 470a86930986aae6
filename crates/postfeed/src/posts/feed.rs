use crate::prelude::{eprintln, println, *};
use postfeed_core::config::Config;
use postfeed_core::posts::{excerpt, Post};
use postfeed_core::store::{FetchPage, ListState, ListStore};
use serde::Serialize;
use tokio::sync::watch;

use super::PostRepository;
use crate::api::HttpClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Load the first three pages, like scrolling to the bottom twice:
  postfeed posts feed --pages 3

  # Scroll, then pull to refresh:
  postfeed posts feed --pages 2 --refresh

NOTES:
  - Scrolling stops early once every post has been loaded
  - --refresh replaces the accumulated posts with a fresh first page")]
pub struct FeedOptions {
    /// Number of pages to load (the first load plus N-1 load-more steps)
    #[arg(long, default_value = "3")]
    pub pages: usize,

    /// Pull to refresh after scrolling
    #[arg(long)]
    pub refresh: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Accumulated feed as printed by `--json`
#[derive(Debug, Serialize)]
pub struct FeedOutput {
    pub items: Vec<Post>,
    pub total: usize,
    pub pages_loaded: usize,
    pub has_more: bool,
}

impl From<ListState<Post>> for FeedOutput {
    fn from(state: ListState<Post>) -> Self {
        Self {
            has_more: state.has_more(),
            pages_loaded: state.pagination.page,
            total: state.total,
            items: state.results,
        }
    }
}

pub async fn run(options: FeedOptions, config: &Config, verbose: bool) -> Result<()> {
    let repository = PostRepository::new(HttpClient::new(config)?);
    let store = repository.list_store(config.page_size);

    let progress = verbose.then(|| tokio::spawn(report_progress(store.subscribe())));

    let state = drive_feed(&store, options.pages, options.refresh)
        .await
        .context("Failed to load the feed")?;

    // Closing the store ends the progress reporter.
    drop(store);
    if let Some(handle) = progress {
        handle.await.ok();
    }

    let output = FeedOutput::from(state);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&output);
    }

    Ok(())
}

/// Load the first page, then keep loading more until `pages` pages are
/// loaded or the feed is exhausted. Optionally refresh at the end.
pub async fn drive_feed<T, F>(
    store: &ListStore<T, F>,
    pages: usize,
    refresh: bool,
) -> Result<ListState<T>, F::Error>
where
    T: Clone,
    F: FetchPage<T>,
{
    store.load().await?;

    for _ in 1..pages {
        if !store.load_more().await? {
            break;
        }
    }

    if refresh {
        store.refresh().await?;
    }

    Ok(store.snapshot())
}

/// One-line description of what the store is doing
pub fn describe_progress<T>(state: &ListState<T>) -> String {
    if state.is_loading {
        "Loading first page...".to_string()
    } else if state.is_refreshing {
        "Refreshing...".to_string()
    } else if state.is_loading_more {
        format!("Loading page {}...", state.pagination.page)
    } else {
        format!("Loaded {} of {} posts", state.results.len(), state.total)
    }
}

async fn report_progress(mut rx: watch::Receiver<ListState<Post>>) {
    let mut last = String::new();

    while rx.changed().await.is_ok() {
        let line = describe_progress(&rx.borrow_and_update());
        if line != last {
            eprintln!("{line}");
            last = line;
        }
    }
}

fn print_table(output: &FeedOutput) {
    if output.items.is_empty() {
        println!("No posts found.");
        return;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Title", "User", "Likes"]);

    for post in &output.items {
        let likes = post.reactions.map(|r| r.likes).unwrap_or(0);
        table.add_row(prettytable::row![
            post.id,
            excerpt(&post.title, 60),
            post.user_id,
            likes
        ]);
    }

    table.printstd();

    println!(
        "\nLoaded {} of {} posts ({} page(s)).",
        output.items.len(),
        output.total,
        output.pages_loaded
    );
    if output.has_more {
        eprintln!(
            "To load more, run:\n  postfeed posts feed --pages {}",
            output.pages_loaded + 1
        );
    }
}
