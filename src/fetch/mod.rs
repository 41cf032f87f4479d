//! HTTP plumbing for the NeoWs feed API.
//!
//! [`NeoClient`] builds and issues the feed request over an [`HttpClient`]
//! transport; [`auth::UrlParam`] layers the API-key credential onto any
//! transport without the feed client knowing about it.

mod basic;
mod client;
mod neo_api;

pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use neo_api::{DEFAULT_BASE_URL, NeoClient};
