use crate::prelude::{println, *};
use colored::Colorize;
use postfeed_core::config::Config;
use postfeed_core::pagination::{validate_page, PageRequest};
use postfeed_core::posts::{build_list_output, excerpt, ListOutput, Post};

use super::PostRepository;
use crate::api::HttpClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of posts per page (defaults to the configured page size)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, config: &Config) -> Result<()> {
    let limit = options.limit.unwrap_or(config.page_size);
    let list_output = list_posts_data(config, options.page, limit).await?;

    if options.json {
        println!("{}", format_list_json(&list_output)?);
    } else {
        print!("{}", format_list_text(&list_output));
    }

    Ok(())
}

/// Fetches one page of posts and returns it as a structured ListOutput
pub async fn list_posts_data(config: &Config, page: usize, limit: usize) -> Result<ListOutput> {
    let request = PageRequest::new(page, limit)?;
    let repository = PostRepository::new(HttpClient::new(config)?);

    let fetched = repository
        .get(request)
        .await
        .context("Failed to fetch posts")?;

    validate_page(fetched.total, request.page, request.page_size)?;

    Ok(build_list_output(fetched, request))
}

/// Convert list output to JSON string
fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_post_line(number: usize, post: &Post) -> String {
    let mut result = format!(
        "\n{} {}\n",
        format!("[{number}]").yellow().bold(),
        post.title.white().bold()
    );

    if let Some(body) = &post.body {
        result.push_str(&format!("    {}\n", excerpt(body, 100).bright_black()));
    }

    let (likes, dislikes) = post
        .reactions
        .map(|r| (r.likes, r.dislikes))
        .unwrap_or_default();

    result.push_str(&format!(
        "    {}: {} | {}: {} | {}: {} | {}: {}\n",
        "ID".green(),
        post.id.to_string().bright_white(),
        "User".green(),
        post.user_id.to_string().bright_white(),
        "Likes".green(),
        likes.to_string().bright_yellow(),
        "Dislikes".green(),
        dislikes.to_string().bright_magenta()
    ));

    result
}

/// Convert list output to formatted text with colors
fn format_list_text(output: &ListOutput) -> String {
    let pagination = &output.pagination;
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "POSTS (Page {} of {})",
            pagination.current_page,
            pagination.total_pages.max(1)
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.items.is_empty() {
        result.push_str(&format!("\n{}\n", "No posts on this page.".yellow()));
    } else {
        let first_number = (pagination.current_page - 1) * pagination.limit + 1;
        for (idx, post) in output.items.iter().enumerate() {
            result.push_str(&format_post_line(first_number + idx, post));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&format!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.max(1).to_string().bright_cyan().bold(),
        pagination.total_items.to_string().bright_cyan().bold(),
        "total posts".bright_white()
    ));

    if pagination.next_page_command.is_some() || pagination.prev_page_command.is_some() {
        result.push_str(&format!("\n{}:\n", "To navigate".bright_white().bold()));
    }
    if let Some(next) = &pagination.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }

    result.push_str(&format!("\n{}:\n", "To read a post".bright_white().bold()));
    result.push_str(&format!("  {}\n", "postfeed posts get <id>".cyan()));
    if let Some(first) = output.items.first() {
        result.push_str(&format!(
            "  {}: {}\n",
            "Example".green(),
            format!("postfeed posts get {}", first.id).cyan()
        ));
    }

    result.push('\n');
    result
}
