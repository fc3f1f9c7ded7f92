//! API client layer of the staffdesk HR front-end. Talks to the staffdesk
//! REST backend over HTTPS with bearer-token authentication; the UI screens
//! sit on top of [`api::ApiClient`].

pub mod api;
pub mod config;
pub mod credentials;

pub use api::{ApiClient, ApiError};
