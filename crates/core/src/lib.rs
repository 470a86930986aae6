//! Core library for postfeed
//!
//! This crate implements the **Functional Core** of the postfeed application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`postfeed_core`** (this crate): domain models, transformations and the
//!   observable stores. No network I/O.
//! - **`postfeed`**: HTTP client, repositories and the CLI (the Imperative Shell)
//!
//! The stores never talk to the network themselves. They receive their
//! collaborators (a page fetch function, an authenticator) through their
//! constructors, so they can be driven by fixture closures in tests and by
//! the HTTP repositories in the binary.
//!
//! # Module Organization
//!
//! - [`auth`]: login payloads, API responses and the [`auth::User`] model
//! - [`posts`]: post models and list output with navigation commands
//! - [`pagination`]: page number to `limit`/`skip` arithmetic
//! - [`store`]: [`store::ListStore`] (load / refresh / load-more) and
//!   [`store::LoginStore`]
//! - [`config`]: TOML configuration with defaults
//! - [`session`]: persisted login session
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use postfeed_core::store::{ListStore, Page};
//!
//! let store = ListStore::new(
//!     |request| async move {
//!         Ok::<_, String>(Page { results: vec!["a", "b"], total: 2 })
//!     },
//!     10,
//! );
//!
//! store.load().await?;
//! assert_eq!(store.state().results, vec!["a", "b"]);
//! ```

pub mod auth;
pub mod config;
pub mod pagination;
pub mod posts;
pub mod session;
pub mod store;
