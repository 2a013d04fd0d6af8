use std::time::Duration;

use crate::Result;

use crate::config::Config;
use crate::generate::{GeminiClient, GenerateError, Post, PostGenerator, RetryPolicy};
use crate::transcript::{TranscriptError, TranscriptSource, YoutubeTranscriptFetcher};

/// Errors from a full fetch-then-generate run
#[derive(thiserror::Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(transparent)]
    Generation(#[from] GenerateError),
}

/// Sequences transcript fetch and post generation for one submission
pub struct Agent {
    source: Box<dyn TranscriptSource>,
    generator: PostGenerator,
}

impl Agent {
    pub fn new(source: Box<dyn TranscriptSource>, generator: PostGenerator) -> Self {
        Self { source, generator }
    }

    /// Build an agent wired to the live YouTube and Gemini endpoints.
    /// Fails up front if no API key is present.
    pub fn from_config(config: &Config, policy: RetryPolicy) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let client = reqwest::Client::new();

        let source = YoutubeTranscriptFetcher::new(client.clone(), config.app.languages.clone());
        let model = GeminiClient::new(client, api_key, config.gemini.model.clone());

        Ok(Self::new(
            Box::new(source),
            PostGenerator::new(Box::new(model), policy),
        ))
    }

    /// Retry policy from config defaults with optional per-run overrides
    pub fn policy_from(config: &Config, retries: Option<u32>, delay: Option<u64>) -> RetryPolicy {
        RetryPolicy::new(
            retries.unwrap_or(config.gemini.retries),
            Duration::from_secs(delay.unwrap_or(config.gemini.delay_seconds)),
        )
    }

    /// Fetch the transcript and generate a post. A fetch failure
    /// short-circuits; the generator is never invoked.
    pub async fn run(
        &self,
        video_id: &str,
        platform: &str,
        query: &str,
    ) -> Result<Post, AgentError> {
        let transcript = self.source.fetch(video_id).await?;

        // A caption track that resolves but carries no text is as useless
        // as captions being disabled outright.
        if transcript.is_empty() {
            return Err(TranscriptError::CaptionsDisabled(video_id.to_string()).into());
        }

        tracing::info!(
            "Fetched transcript for {} ({} snippets)",
            video_id,
            transcript.snippets.len()
        );
        tracing::debug!(
            "Transcript preview: {}",
            crate::utils::preview(&transcript.text(), 120)
        );

        let post = self
            .generator
            .generate(&transcript.text(), platform, query)
            .await?;

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::MockGenerativeModel;
    use crate::transcript::{MockTranscriptSource, Snippet, Transcript};

    fn transcript_of(video_id: &str, texts: &[&str]) -> Transcript {
        Transcript {
            video_id: video_id.to_string(),
            language: Some("en".to_string()),
            snippets: texts
                .iter()
                .enumerate()
                .map(|(i, text)| Snippet {
                    text: text.to_string(),
                    start: i as f64,
                    duration: 1.0,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn fetch_failure_short_circuits_generation() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|video_id| Err(TranscriptError::NotFound(video_id.to_string())));

        // The model must never be called when the fetch fails
        let mut model = MockGenerativeModel::new();
        model.expect_generate().times(0);

        let agent = Agent::new(
            Box::new(source),
            PostGenerator::new(Box::new(model), RetryPolicy::new(3, Duration::ZERO)),
        );

        let err = agent.run("missing", "LinkedIn", "Summarize").await.unwrap_err();

        match err {
            AgentError::Transcript(TranscriptError::NotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("expected transcript error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_transcript_short_circuits_generation() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(transcript_of("abc123", &[])));

        let mut model = MockGenerativeModel::new();
        model.expect_generate().times(0);

        let agent = Agent::new(
            Box::new(source),
            PostGenerator::new(Box::new(model), RetryPolicy::new(3, Duration::ZERO)),
        );

        let err = agent.run("abc123", "LinkedIn", "Summarize").await.unwrap_err();

        match err {
            AgentError::Transcript(TranscriptError::CaptionsDisabled(id)) => {
                assert_eq!(id, "abc123")
            }
            other => panic!("expected captions-disabled error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_feeds_joined_transcript_into_the_prompt() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(transcript_of("abc123", &["Hello", "world"])));

        let mut model = MockGenerativeModel::new();
        model
            .expect_generate()
            .withf(|prompt: &str| {
                prompt.contains("Summarize")
                    && prompt.contains("Hello world")
                    && prompt.contains("LinkedIn")
            })
            .times(1)
            .returning(|_| Ok(" Great video! ".to_string()));

        let agent = Agent::new(
            Box::new(source),
            PostGenerator::new(Box::new(model), RetryPolicy::new(3, Duration::ZERO)),
        );

        let post = agent.run("abc123", "LinkedIn", "Summarize").await.unwrap();

        assert_eq!(post.platform, "LinkedIn");
        assert_eq!(post.content, "Great video!");
    }

    #[tokio::test]
    async fn generation_errors_surface_as_generation_variant() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(transcript_of("abc123", &["Hello"])));

        let mut model = MockGenerativeModel::new();
        model
            .expect_generate()
            .times(2)
            .returning(|_| Err(GenerateError::EmptyResponse));

        let agent = Agent::new(
            Box::new(source),
            PostGenerator::new(Box::new(model), RetryPolicy::new(2, Duration::ZERO)),
        );

        let err = agent.run("abc123", "LinkedIn", "Summarize").await.unwrap_err();

        match err {
            AgentError::Generation(GenerateError::RetriesExhausted { attempts, .. }) => {
                assert_eq!(attempts, 2)
            }
            other => panic!("expected generation error, got {other:?}"),
        }
    }
}
