use crate::prelude::{println, *};
use std::path::Path;

use colored::Colorize;
use postfeed_core::auth::LoginPayload;
use postfeed_core::config::Config;
use postfeed_core::session::{save_session, Session};
use postfeed_core::store::LoginStore;

use super::{format_user_text, AuthRepository};
use crate::api::HttpClient;

#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  postfeed auth login --username emilys --password emilyspass
  POSTFEED_PASSWORD=emilyspass postfeed auth login --email emilys@example.com

NOTES:
  - With --email, the part before @ is sent as the username")]
pub struct LoginOptions {
    /// Account username
    #[arg(short, long, required_unless_present = "email", conflicts_with = "email")]
    pub username: Option<String>,

    /// Account email
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password
    #[arg(short, long, env = "POSTFEED_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<LoginOptions> for LoginPayload {
    fn from(options: LoginOptions) -> Self {
        Self {
            username: options.username,
            email: options.email,
            password: options.password,
        }
    }
}

pub async fn run(options: LoginOptions, config: &Config, session_dir: &Path) -> Result<()> {
    let json = options.json;
    let store = LoginStore::new(AuthRepository::new(HttpClient::new(config)?));

    let session = login_and_save(&store, &options.into(), session_dir).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session.user)?);
    } else {
        println!("{} {}", "Logged in as".green().bold(), session.user.name);
        print!("{}", format_user_text(&session.user));
    }

    Ok(())
}

/// Log in through the store and persist the resulting session
pub async fn login_and_save(
    store: &LoginStore<AuthRepository>,
    payload: &LoginPayload,
    session_dir: &Path,
) -> Result<Session> {
    let user = store.login(payload).await.context("Login failed")?;

    let session = Session::from_user(user);
    let path = save_session(session_dir, &session)?;
    log::info!("Session saved to {}", path.display());

    Ok(session)
}
