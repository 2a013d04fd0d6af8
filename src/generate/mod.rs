use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod gemini;

pub use gemini::GeminiClient;

/// The platform/content pair produced per submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Platform the post was written for
    pub platform: String,

    /// Generated post body, trimmed of surrounding whitespace
    pub content: String,
}

/// Bounded sequential retry: fixed delay between failed attempts,
/// no backoff growth, no delay after the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least 1
    pub attempts: u32,

    /// Sleep between failed attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Errors from post generation
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<GenerateError>,
    },
}

/// Trait over the generation endpoint, so tests can substitute a double
/// for the live API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Submit one prompt and return the model's text response
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Build the single prompt embedding the user query, the transcript,
/// and the target platform.
pub fn build_prompt(query: &str, transcript: &str, platform: &str) -> String {
    format!(
        "Here is a user query: {query}\n\n\
         Here is the YouTube video transcript: {transcript}\n\n\
         Generate a social media post for {platform}."
    )
}

/// Generates posts with bounded retry around the model call
pub struct PostGenerator {
    model: Box<dyn GenerativeModel>,
    policy: RetryPolicy,
}

impl PostGenerator {
    pub fn new(model: Box<dyn GenerativeModel>, policy: RetryPolicy) -> Self {
        Self { model, policy }
    }

    /// Generate a post from a transcript. Retries the model call up to
    /// the policy's attempt count with a fixed delay between failures.
    pub async fn generate(
        &self,
        transcript: &str,
        platform: &str,
        query: &str,
    ) -> Result<Post, GenerateError> {
        let prompt = build_prompt(query, transcript, platform);
        let attempts = self.policy.attempts;

        let mut attempt = 0;
        let last = loop {
            attempt += 1;

            match self.model.generate(&prompt).await {
                Ok(text) => {
                    return Ok(Post {
                        platform: platform.to_string(),
                        content: text.trim().to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "Generation attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        e
                    );

                    if attempt >= attempts {
                        break e;
                    }

                    tokio::time::sleep(self.policy.delay).await;
                }
            }
        };

        Err(GenerateError::RetriesExhausted {
            attempts,
            last: Box::new(last),
        })
    }
}
