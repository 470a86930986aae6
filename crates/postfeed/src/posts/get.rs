use crate::prelude::{println, *};
use colored::Colorize;
use postfeed_core::config::Config;
use postfeed_core::posts::Post;

use super::PostRepository;
use crate::api::HttpClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GetOptions {
    /// Post ID
    #[clap(env = "POSTFEED_POST")]
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: GetOptions, config: &Config) -> Result<()> {
    let repository = PostRepository::new(HttpClient::new(config)?);

    let post = repository
        .find(options.id)
        .await
        .with_context(|| format!("Failed to fetch post {}", options.id))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", format_post_text(&post));
    }

    Ok(())
}

fn format_post_text(post: &Post) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", post.title.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {} | {}: {}\n",
        "ID".green(),
        post.id.to_string().bright_white(),
        "User".green(),
        post.user_id.to_string().bright_white()
    ));

    if let Some(reactions) = post.reactions {
        result.push_str(&format!(
            "{}: {} | {}: {}\n",
            "Likes".green(),
            reactions.likes.to_string().bright_yellow(),
            "Dislikes".green(),
            reactions.dislikes.to_string().bright_magenta()
        ));
    }

    match &post.body {
        Some(body) => result.push_str(&format!("\n{body}\n")),
        None => result.push_str(&format!("\n{}\n", "(No body)".bright_black())),
    }

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use postfeed_core::posts::Reactions;

    #[test]
    fn test_format_post_text() {
        colored::control::set_override(false);
        let post = Post {
            id: 3,
            user_id: 9,
            title: "A title".to_string(),
            body: Some("The body.".to_string()),
            reactions: Some(Reactions {
                likes: 4,
                dislikes: 2,
            }),
        };

        let text = format_post_text(&post);

        assert!(text.contains("A title"));
        assert!(text.contains("ID: 3 | User: 9"));
        assert!(text.contains("Likes: 4 | Dislikes: 2"));
        assert!(text.contains("The body."));
    }

    #[test]
    fn test_format_post_text_without_body() {
        colored::control::set_override(false);
        let post = Post {
            id: 3,
            user_id: 9,
            title: "A title".to_string(),
            body: None,
            reactions: None,
        };

        let text = format_post_text(&post);

        assert!(text.contains("(No body)"));
        assert!(!text.contains("Likes"));
    }
}
