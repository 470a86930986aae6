use crate::prelude::*;

use postfeed_core::pagination::PageRequest;
use postfeed_core::posts::{transform_posts_response, Post, PostDto, PostsResponseDto};
use postfeed_core::store::{FetchPage, ListStore, Page};

use crate::api::HttpClient;

pub mod feed;
pub mod get;
pub mod list;

#[derive(Debug, clap::Parser)]
#[command(name = "posts")]
#[command(about = "Posts feed operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List a single page of posts
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Scroll through the feed page by page, accumulating posts
    #[clap(name = "feed")]
    Feed(feed::FeedOptions),

    /// Show a single post
    #[clap(name = "get")]
    Get(get::GetOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = crate::config::load(&global)?;

    match app.command {
        Commands::List(options) => list::run(options, &config).await,
        Commands::Feed(options) => feed::run(options, &config, global.verbose).await,
        Commands::Get(options) => get::run(options, &config).await,
    }
}

/// Posts endpoints of the API
#[derive(Debug, Clone)]
pub struct PostRepository {
    http: HttpClient,
}

impl PostRepository {
    const BASE_PATH: &'static str = "/posts";

    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch one page of posts
    pub async fn get(&self, request: PageRequest) -> Result<Page<Post>, Error> {
        let query = request.to_query();
        log::debug!(
            "GET {} page={} limit={} skip={}",
            Self::BASE_PATH,
            request.page,
            query.limit,
            query.skip
        );

        let response: PostsResponseDto = self.http.get_query(Self::BASE_PATH, &query).await?;
        log::debug!(
            "received {} posts of {} (skip={} limit={})",
            response.posts.len(),
            response.total,
            response.skip,
            response.limit
        );

        Ok(transform_posts_response(response))
    }

    /// Fetch a single post by id
    pub async fn find(&self, id: u64) -> Result<Post, Error> {
        let dto: PostDto = self
            .http
            .get(&format!("{}/{id}", Self::BASE_PATH))
            .await?;
        Ok(dto.into())
    }

    /// A list store whose fetch function is this repository
    pub fn list_store(
        &self,
        page_size: usize,
    ) -> ListStore<Post, impl FetchPage<Post, Error = Error>> {
        let repository = self.clone();
        ListStore::new(
            move |request: PageRequest| {
                let repository = repository.clone();
                async move { repository.get(request).await }
            },
            page_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_mock_api, test_config, TOTAL_POSTS};

    async fn repository() -> PostRepository {
        let base_url = spawn_mock_api().await;
        PostRepository::new(HttpClient::new(&test_config(&base_url)).unwrap())
    }

    #[tokio::test]
    async fn test_get_translates_page_to_offset() {
        let repository = repository().await;

        let page = repository.get(PageRequest::new(3, 10).unwrap()).await.unwrap();

        assert_eq!(page.total, TOTAL_POSTS);
        let ids: Vec<u64> = page.results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.results[0].user_id, 121);
    }

    #[tokio::test]
    async fn test_find() {
        let repository = repository().await;

        let post = repository.find(7).await.unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.title, "Post number 7");
        assert_eq!(post.reactions.map(|r| r.likes), Some(14));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repository = repository().await;

        let err = repository.find(999).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_list_store_scrolls_to_the_end() {
        let repository = repository().await;
        let store = repository.list_store(10);

        store.load().await.unwrap();
        assert!(store.load_more().await.unwrap());
        assert!(store.load_more().await.unwrap());
        assert!(!store.load_more().await.unwrap());

        let state = store.snapshot();
        assert_eq!(state.results.len(), TOTAL_POSTS);
        assert_eq!(state.pagination.page, 3);
        assert!(!state.has_more());

        store.refresh().await.unwrap();
        let state = store.snapshot();
        assert_eq!(state.results.len(), 10);
        assert_eq!(state.pagination.page, 1);
    }
}
