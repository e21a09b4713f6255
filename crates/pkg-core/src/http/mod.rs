//! Blocking HTTP transport used to download artifacts.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpError};
