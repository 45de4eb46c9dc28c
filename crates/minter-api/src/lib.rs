//! Typed async client for the Minter node REST API.
//!
//! [`MinterClient`] maps every node endpoint to one method. Requests go
//! through a [`Transport`](transport::Transport); the default
//! [`HttpTransport`](transport::HttpTransport) issues plain HTTP GETs with
//! `reqwest`.

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod transport;
pub mod types;

pub use client::MinterClient;
pub use config::ClientConfig;
pub use error::{ApiError, NodeError};
pub use params::QueryParams;
pub use types::{Balance, NodeResponse};
