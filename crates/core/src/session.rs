//! Session storage and retrieval functions
//!
//! Functions for persisting the logged-in user's token between runs. The
//! session lives in a single JSON file inside the directory handed in by
//! the caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::User;

const SESSION_FILE: &str = "session.json";

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted session file {path}: {message}")]
    Corrupted { path: PathBuf, message: String },

    #[error("Not logged in. Run `postfeed auth login` first.")]
    NotLoggedIn,
}

/// A persisted login
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

impl Session {
    pub fn from_user(user: User) -> Self {
        Self {
            token: user.token.clone(),
            refresh_token: user.refresh_token.clone(),
            user,
        }
    }
}

/// Path of the session file inside `session_dir`
pub fn session_path(session_dir: &Path) -> PathBuf {
    session_dir.join(SESSION_FILE)
}

/// Save a session, creating the directory if needed
pub fn save_session(session_dir: &Path, session: &Session) -> Result<PathBuf, SessionError> {
    fs::create_dir_all(session_dir)?;

    let path = session_path(session_dir);
    let json = serde_json::to_string_pretty(session).map_err(|e| SessionError::Corrupted {
        path: path.clone(),
        message: e.to_string(),
    })?;

    fs::write(&path, json)?;
    Ok(path)
}

/// Load the saved session
///
/// Returns [`SessionError::NotLoggedIn`] when no session file exists.
pub fn load_session(session_dir: &Path) -> Result<Session, SessionError> {
    let path = session_path(session_dir);
    if !path.exists() {
        return Err(SessionError::NotLoggedIn);
    }

    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| SessionError::Corrupted {
        path,
        message: e.to_string(),
    })
}

/// Remove the saved session
///
/// Returns whether a session existed.
pub fn clear_session(session_dir: &Path) -> Result<bool, SessionError> {
    let path = session_path(session_dir);
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path)?;
    Ok(true)
}
