/// Errors raised by the HTTP layer
///
/// This is the error type the stores see from their injected collaborators.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized [{status}]: {body}")]
    Unauthorized { status: u16, body: String },

    #[error("API error [{status}]: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}
