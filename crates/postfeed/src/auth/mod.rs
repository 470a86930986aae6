use crate::prelude::{println, *};
use colored::Colorize;

use postfeed_core::auth::{
    transform_auth_response, transform_user_profile, AuthResponseDto, LoginPayload, User,
    UserProfileDto,
};
use postfeed_core::session::clear_session;
use postfeed_core::store::Authenticator;

use crate::api::HttpClient;

pub mod login;
pub mod whoami;

#[derive(Debug, clap::Parser)]
#[command(name = "auth")]
#[command(about = "Login session operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Exchange credentials for a token and save the session
    #[clap(name = "login")]
    Login(login::LoginOptions),

    /// Show the profile of the logged-in user
    #[clap(name = "whoami")]
    Whoami(whoami::WhoamiOptions),

    /// Forget the saved session
    #[clap(name = "logout")]
    Logout,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = crate::config::load(&global)?;
    let session_dir = crate::config::config_dir(&global)?;

    match app.command {
        Commands::Login(options) => login::run(options, &config, &session_dir).await,
        Commands::Whoami(options) => whoami::run(options, &config, &session_dir).await,
        Commands::Logout => {
            if clear_session(&session_dir)? {
                println!("Logged out.");
            } else {
                println!("No saved session.");
            }
            Ok(())
        }
    }
}

/// Authentication endpoints of the API
#[derive(Debug, Clone)]
pub struct AuthRepository {
    http: HttpClient,
}

impl AuthRepository {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Authenticator for AuthRepository {
    type Error = Error;

    async fn login(&self, payload: &LoginPayload) -> Result<User, Error> {
        let request = payload.to_request();
        log::debug!("POST /auth/login username={}", request.username);

        let response: AuthResponseDto = self.http.post("/auth/login", &request).await?;
        Ok(transform_auth_response(response))
    }

    async fn current_user(&self, token: &str) -> Result<User, Error> {
        let response: UserProfileDto = self
            .http
            .clone()
            .with_token(token)
            .get("/user/me")
            .await?;
        Ok(transform_user_profile(response, token))
    }
}

/// Human-readable user summary
pub fn format_user_text(user: &User) -> String {
    let mut result = format!("{}\n", user.name.bright_cyan().bold());

    if let Some(username) = &user.username {
        result.push_str(&format!("  {}: {}\n", "Username".green(), username));
    }
    result.push_str(&format!("  {}: {}\n", "Email".green(), user.email));
    result.push_str(&format!("  {}: {}\n", "ID".green(), user.id));
    if let Some(gender) = &user.gender {
        result.push_str(&format!("  {}: {}\n", "Gender".green(), gender));
    }
    if let Some(image) = &user.image {
        result.push_str(&format!("  {}: {}\n", "Image".green(), image.cyan()));
    }

    result
}
