//! Summary generation backends.
//!
//! The pipeline in [`super::summary`] only depends on [`SummaryGenerator`];
//! the `OpenAI` client here is the production backend, tests substitute a
//! stub.

use async_trait::async_trait;
use lectureboard_common::{AppError, AppResult, SummarizerConfig};
use lectureboard_db::entities::post;
use serde::Deserialize;
use std::time::Duration;

/// Most-liked posts included in the prompt; the long tail is summarized
/// only through the aggregate counts.
pub const MAX_PROMPT_POSTS: usize = 50;

/// A rendered summarization prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    /// System role instructions.
    pub system: String,
    /// The post digest the model summarizes.
    pub user: String,
}

/// Build the prompt from a lecture's posts (already ordered by
/// popularity) and its aggregate counts.
#[must_use]
pub fn build_prompt(posts: &[post::Model], total_posts: u64, total_likes: u64) -> SummaryPrompt {
    let system = "You are an assistant that summarizes anonymous student feedback \
                  posted during a university lecture. Write a concise summary \
                  covering: the main discussion points, what students were most \
                  interested in (weighting posts by like count), and the overall \
                  trends in the feedback. Answer in plain prose."
        .to_string();

    let mut user = format!(
        "The lecture received {total_posts} posts and {total_likes} likes in total. \
         The most-liked posts follow.\n\n"
    );
    for (i, p) in posts.iter().take(MAX_PROMPT_POSTS).enumerate() {
        user.push_str(&format!(
            "[Post {}] Likes: {}\n{}\n\n",
            i + 1,
            p.like_count,
            p.content
        ));
    }

    SummaryPrompt { system, user }
}

/// Summary generation backend.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Generate summary text from a rendered prompt.
    async fn generate(&self, prompt: &SummaryPrompt) -> AppResult<String>;
}

/// `OpenAI` chat-completions backend.
pub struct OpenAiSummarizer {
    config: SummarizerConfig,
    http_client: reqwest::Client,
}

impl OpenAiSummarizer {
    /// Create a new `OpenAI` summarizer.
    ///
    /// Fails when the HTTP client cannot be constructed; a missing API key
    /// is only reported when a summary is actually requested.
    pub fn new(config: SummarizerConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl SummaryGenerator for OpenAiSummarizer {
    async fn generate(&self, prompt: &SummaryPrompt) -> AppResult<String> {
        let api_key = self
            .config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| AppError::Config("OpenAI API key not configured".to_string()))?;

        let body = serde_json::json!({
            "model": self.config.openai_model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.7,
            "max_tokens": 1000,
        });

        let response = self
            .http_client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("OpenAI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "OpenAI API error: {status} - {body}"
            )));
        }

        #[derive(Deserialize)]
        struct OpenAiResponse {
            choices: Vec<OpenAiChoice>,
        }

        #[derive(Deserialize)]
        struct OpenAiChoice {
            message: OpenAiMessage,
        }

        #[derive(Deserialize)]
        struct OpenAiMessage {
            content: String,
        }

        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse OpenAI response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Upstream("no summary returned".to_string()))?
            .message
            .content
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(AppError::Upstream("empty summary returned".to_string()));
        }

        Ok(content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_post(id: &str, content: &str, like_count: i32) -> post::Model {
        post::Model {
            id: id.to_string(),
            lecture_id: "lec1".to_string(),
            content: content.to_string(),
            like_count,
            created_at: Utc::now().into(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_build_prompt_includes_counts_and_posts() {
        let posts = vec![
            test_post("p1", "Please slow down on slide 12", 5),
            test_post("p2", "Great example with the cache", 2),
        ];

        let prompt = build_prompt(&posts, 10, 7);

        assert!(prompt.user.contains("10 posts"));
        assert!(prompt.user.contains("7 likes"));
        assert!(prompt.user.contains("[Post 1] Likes: 5"));
        assert!(prompt.user.contains("Please slow down on slide 12"));
        assert!(prompt.user.contains("[Post 2] Likes: 2"));
    }

    #[test]
    fn test_build_prompt_caps_post_count() {
        let posts: Vec<post::Model> = (0..60)
            .map(|i| test_post(&format!("p{i}"), "hello", 0))
            .collect();

        let prompt = build_prompt(&posts, 60, 0);

        assert!(prompt.user.contains("[Post 50]"));
        assert!(!prompt.user.contains("[Post 51]"));
    }

    #[tokio::test]
    async fn test_generate_without_api_key_is_config_error() {
        let summarizer = OpenAiSummarizer::new(SummarizerConfig::default()).unwrap();
        let prompt = build_prompt(&[], 0, 0);

        let result = summarizer.generate(&prompt).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
