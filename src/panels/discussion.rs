use serde_json::Value;

use super::{next_generation, PanelState};
use crate::api::{ApiClient, ApiError};
use crate::model::RedditPost;
use crate::util::{format_count, strip_control_chars, truncate_chars};

pub const NO_POSTS_MESSAGE: &str = "No recent Reddit posts found for this topic.";
/// Post bodies longer than this many characters are cut and marked with `...`.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// A post prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    /// `"{subreddit} • {date}"`
    pub header: String,
    pub title: String,
    pub url: String,
    pub upvotes: String,
    pub body: Option<String>,
}

impl PostView {
    pub fn from_post(post: &RedditPost) -> Self {
        let body = post
            .body
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(strip_control_chars)
            .map(|b| truncate_chars(&b, BODY_PREVIEW_CHARS).into_owned());

        Self {
            header: format!(
                "{} \u{2022} {}",
                strip_control_chars(&post.subreddit),
                post.created_at.format("%Y-%m-%d")
            ),
            title: strip_control_chars(&post.title).into_owned(),
            url: post.url.clone(),
            upvotes: format_count(post.upvotes),
            body,
        }
    }
}

/// Recent discussion posts for the article the user picked.
#[derive(Debug, Default)]
pub struct DiscussionFeedPanel {
    heading: Option<String>,
    state: PanelState<Vec<PostView>>,
    selected: usize,
    generation: u64,
}

impl DiscussionFeedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Latest Discussions: {title}` once a topic has been requested.
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn state(&self) -> &PanelState<Vec<PostView>> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn posts(&self) -> &[PostView] {
        self.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_post(&self) -> Option<&PostView> {
        self.posts().get(self.selected)
    }

    /// Set the heading, enter Loading and return the request generation.
    pub fn begin(&mut self, subject_title: &str) -> u64 {
        self.heading = Some(format!("Latest Discussions: {}", subject_title));
        self.state = PanelState::Loading;
        self.selected = 0;
        next_generation(&mut self.generation)
    }

    /// Apply a fetch result. Returns false when the result was stale and dropped.
    pub fn complete(&mut self, generation: u64, result: Result<Value, ApiError>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale discussion response"
            );
            return false;
        }

        let posts = result.map_err(|e| e.to_string()).and_then(|body| {
            serde_json::from_value::<Vec<RedditPost>>(body).map_err(|e| e.to_string())
        });

        self.selected = 0;
        self.state = match posts {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "Loaded discussion posts");
                PanelState::Loaded(posts.iter().map(PostView::from_post).collect())
            }
            Err(cause) => {
                tracing::error!(error = %cause, "Failed to load posts");
                PanelState::Error(format!("Failed to load posts: {}", cause))
            }
        };
        true
    }

    /// Begin, fetch and apply in one call.
    pub async fn load(&mut self, api: &ApiClient, article_id: &str, subject_title: &str) -> bool {
        let generation = self.begin(subject_title);
        let result = api.fetch_reddit_posts(article_id).await;
        self.complete(generation, result)
    }

    pub fn select_next(&mut self) {
        let len = self.posts().len();
        if len > 0 {
            self.selected = self.selected.saturating_add(1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Link of the selected post, if it has one.
    pub fn selected_url(&self) -> Option<&str> {
        self.selected_post()
            .map(|p| p.url.as_str())
            .filter(|u| !u.is_empty())
    }
}
