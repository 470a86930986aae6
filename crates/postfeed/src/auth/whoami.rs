use crate::prelude::{println, *};
use std::path::Path;

use postfeed_core::auth::User;
use postfeed_core::config::Config;
use postfeed_core::session::{clear_session, load_session};
use postfeed_core::store::Authenticator;

use super::{format_user_text, AuthRepository};
use crate::api::HttpClient;

#[derive(Debug, clap::Args, Clone)]
pub struct WhoamiOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: WhoamiOptions, config: &Config, session_dir: &Path) -> Result<()> {
    let repository = AuthRepository::new(HttpClient::new(config)?);
    let user = current_user(&repository, session_dir).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        print!("{}", format_user_text(&user));
    }

    Ok(())
}

/// Fetch the profile for the saved session
///
/// A rejected token clears the saved session.
pub async fn current_user(repository: &AuthRepository, session_dir: &Path) -> Result<User> {
    let session = load_session(session_dir)?;

    match repository.current_user(&session.token).await {
        Ok(mut user) => {
            user.refresh_token = session.refresh_token;
            Ok(user)
        }
        Err(Error::Unauthorized { status, .. }) => {
            log::warn!("token rejected with status {status}, clearing session");
            clear_session(session_dir)?;
            Err(eyre!(
                "Session expired. Run `postfeed auth login` to log in again."
            ))
        }
        Err(err) => Err(err).context("Failed to fetch the current user"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_mock_api, test_config, VALID_TOKEN};
    use postfeed_core::session::{save_session, session_path, Session};

    fn saved_user(token: &str) -> User {
        User {
            id: 1,
            email: "emily.johnson@x.dummyjson.com".to_string(),
            name: "Emily Johnson".to_string(),
            token: token.to_string(),
            username: Some("emilys".to_string()),
            first_name: None,
            last_name: None,
            gender: None,
            image: None,
            refresh_token: Some("refresh-456".to_string()),
        }
    }

    async fn repository() -> AuthRepository {
        let base_url = spawn_mock_api().await;
        AuthRepository::new(HttpClient::new(&test_config(&base_url)).unwrap())
    }

    #[tokio::test]
    async fn test_current_user_with_saved_session() {
        let repository = repository().await;
        let dir = tempfile::tempdir().unwrap();
        save_session(dir.path(), &Session::from_user(saved_user(VALID_TOKEN))).unwrap();

        let user = current_user(&repository, dir.path()).await.unwrap();

        assert_eq!(user.username.as_deref(), Some("emilys"));
        assert_eq!(user.refresh_token.as_deref(), Some("refresh-456"));
    }

    #[tokio::test]
    async fn test_current_user_without_session() {
        let repository = repository().await;
        let dir = tempfile::tempdir().unwrap();

        let err = current_user(&repository, dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
    }

    #[tokio::test]
    async fn test_rejected_token_clears_session() {
        let repository = repository().await;
        let dir = tempfile::tempdir().unwrap();
        save_session(dir.path(), &Session::from_user(saved_user("expired"))).unwrap();

        let err = current_user(&repository, dir.path()).await.unwrap_err();

        assert!(err.to_string().contains("Session expired"));
        assert!(!session_path(dir.path()).exists());
    }
}
