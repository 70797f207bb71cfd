//! Blocking client for the basic-auth todo REST service.
//!
//! # Overview
//! `TodoServiceClient` exposes list, create and delete against a fixed set of
//! endpoints under a base URL. It delegates HTTP to `AuthenticatedHttpClient`,
//! which stamps basic-auth credentials on every request and hands it to a
//! `Transport` (`UreqTransport` in production).
//!
//! # Design
//! - Requests and responses cross the `Transport` boundary as plain data, so
//!   everything above it is testable without a server.
//! - Configuration is immutable after construction; the client carries no
//!   state between calls.
//! - Each operation comes in two forms: `try_*` returns `Result<_, ApiError>`,
//!   the plain form logs the failure and returns `None` or `false`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::TodoServiceClient;
pub use config::{ClientConfig, Credentials};
pub use error::ApiError;
pub use http::AuthenticatedHttpClient;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{TodoCollection, TodoRecord};
