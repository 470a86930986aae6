use serde::{Deserialize, Serialize};

use crate::pagination::{page_count, PageRequest};
use crate::store::Page;

/// Reaction counters as returned by the API
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reactions {
    pub likes: u64,
    pub dislikes: u64,
}

/// Post from the API
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: Option<String>,
    pub reactions: Option<Reactions>,
}

/// Response of `GET /posts`
#[derive(Debug, Deserialize, Clone)]
pub struct PostsResponseDto {
    pub posts: Vec<PostDto>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// A single feed entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: Option<String>,
    pub reactions: Option<Reactions>,
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        Self {
            id: dto.id,
            user_id: dto.user_id,
            title: dto.title,
            body: dto.body,
            reactions: dto.reactions,
        }
    }
}

/// Pagination metadata for list output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListPaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Complete list output with posts and pagination
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub items: Vec<Post>,
    pub pagination: ListPaginationInfo,
}

/// Transform a posts response into a domain page
pub fn transform_posts_response(response: PostsResponseDto) -> Page<Post> {
    Page {
        results: response.posts.into_iter().map(Post::from).collect(),
        total: response.total,
    }
}

/// Build list output with pagination metadata and navigation commands
pub fn build_list_output(page: Page<Post>, request: PageRequest) -> ListOutput {
    let total_pages = page_count(page.total, request.page_size);

    let next_page = if request.page < total_pages {
        Some(format!(
            "postfeed posts list --page {} --limit {}",
            request.page + 1,
            request.page_size
        ))
    } else {
        None
    };

    let prev_page = if request.page > 1 {
        Some(format!(
            "postfeed posts list --page {} --limit {}",
            request.page - 1,
            request.page_size
        ))
    } else {
        None
    };

    ListOutput {
        items: page.results,
        pagination: ListPaginationInfo {
            current_page: request.page,
            total_pages,
            total_items: page.total,
            limit: request.page_size,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    }
}

/// Shorten a post body for one-line display
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
