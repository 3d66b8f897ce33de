//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable streaming responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
