//! Typed async client for GitHub-style REST APIs.
//!
//! ```no_run
//! use hubclient::{Client, WatchedService};
//!
//! # async fn run() -> Result<(), hubclient::Error> {
//! let client = Client::github(None).await?;
//! let watching = client.watched().check_watched("rust-lang", "rust").await?;
//! # Ok(())
//! # }
//! ```
mod client;
mod connection;
pub mod model;
mod pagination;
mod path;
pub mod services;
pub mod status;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ArgumentError, Client, Error, ErrorKind, DEFAULT_BASE_URL};
pub use connection::ApiConnection;
pub use model::{NewSubscription, Repository, Subscription, User};
pub use pagination::ApiOptions;
pub use path::Endpoint;
pub use services::{
    starred::{StarredClient, StarredService},
    watched::{WatchedClient, WatchedService},
};
