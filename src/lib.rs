//! kai - streaming client for the kAI content agent
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod sse;
pub mod traits;

pub use agent::{call_kai_content_agent, ContentAgentClient, ContentAgentRequest};
pub use config::{AgentConfig, ConfigError};
pub use error::{KaiError, KaiResult};
pub use sse::{
    parse_openai_stream, parse_sse_stream, parse_sse_stream_with_progress, ParseOptions,
    StreamSummary,
};
