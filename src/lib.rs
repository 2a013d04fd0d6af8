//! Postscribe - A Rust CLI tool for turning YouTube videos into social media posts
//!
//! This library fetches the caption transcript of a YouTube video and asks
//! Google's Gemini API to write a short post for a chosen social platform.

pub mod agent;
pub mod cli;
pub mod config;
pub mod generate;
pub mod interactive;
pub mod output;
pub mod transcript;
pub mod utils;

pub use agent::{Agent, AgentError};
pub use cli::{Cli, Commands, Platform};
pub use config::Config;
pub use generate::{GenerateError, Post, PostGenerator, RetryPolicy};
pub use transcript::{Snippet, Transcript, TranscriptError};

/// Result type used throughout the library; defaults to `anyhow::Error`
/// but accepts the typed module errors as well.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
