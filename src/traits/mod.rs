//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Streaming HTTP POST

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, StreamingResponse};
