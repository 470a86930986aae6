use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod auth;
mod config;
mod error;
mod posts;
mod prelude;

#[cfg(test)]
mod test_support;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse a paginated posts feed and manage a login session"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct Global {
    /// API base URL (defaults to the value in config.toml, then https://dummyjson.com)
    #[clap(long, env = "POSTFEED_API_URL", global = true)]
    api_url: Option<String>,

    /// Number of posts per page
    #[clap(long, env = "POSTFEED_PAGE_SIZE", global = true)]
    page_size: Option<usize>,

    /// Directory holding config.toml and the saved session
    #[clap(long, env = "POSTFEED_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "POSTFEED_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Posts feed operations
    Posts(crate::posts::App),

    /// Login session operations
    Auth(crate::auth::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Posts(sub_app) => crate::posts::run(sub_app, app.global).await,
        SubCommands::Auth(sub_app) => crate::auth::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
