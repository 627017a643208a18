//! Wire types returned by the dashboard backend.
//!
//! The backend has shipped more than one shape for the same records over time
//! (the dated trending endpoint says `wikipediaUrl`, the Reddit DTO says
//! `postedAt`), so field aliases cover both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A trending Wikipedia article as listed by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(deserialize_with = "de_opaque_id")]
    pub id: String,
    pub title: String,
    #[serde(alias = "wikipediaUrl", default)]
    pub article_url: String,
    #[serde(deserialize_with = "de_count", default)]
    pub views: u64,
    #[serde(deserialize_with = "de_delta", default)]
    pub view_trend: i64,
}

/// A discussion post about an article's subject.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedditPost {
    pub subreddit: String,
    #[serde(alias = "postedAt")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub url: String,
    #[serde(deserialize_with = "de_count", default)]
    pub upvotes: u64,
    #[serde(default)]
    pub body: Option<String>,
}

/// Accept numeric or string identifiers and keep them as text.
fn de_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Non-negative count that may arrive as a float; negative or null reads as 0.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        Ok(value.round() as u64)
    } else {
        Ok(0)
    }
}

/// Signed delta that may arrive as a float (the backend stores it as a double).
fn de_delta<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_finite() {
        Ok(value.round() as i64)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_from_top_articles_shape() {
        let article: Article = serde_json::from_value(json!({
            "id": 42,
            "title": "Rust (programming language)",
            "views": 125000,
            "articleUrl": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            "viewTrend": -3200.0
        }))
        .unwrap();

        assert_eq!(article.id, "42");
        assert_eq!(article.views, 125_000);
        assert_eq!(article.view_trend, -3200);
        assert!(article.article_url.ends_with("Rust_(programming_language)"));
    }

    #[test]
    fn test_article_from_trending_topics_shape() {
        let article: Article = serde_json::from_value(json!({
            "id": "7",
            "title": "Aurora",
            "wikipediaUrl": "https://en.wikipedia.org/wiki/Aurora",
            "views": 900.4,
            "viewTrend": 120.6
        }))
        .unwrap();

        assert_eq!(article.id, "7");
        assert_eq!(article.article_url, "https://en.wikipedia.org/wiki/Aurora");
        assert_eq!(article.views, 900);
        assert_eq!(article.view_trend, 121);
    }

    #[test]
    fn test_article_null_trend_reads_as_zero() {
        let article: Article = serde_json::from_value(json!({
            "id": 1,
            "title": "Null",
            "views": null,
            "viewTrend": null
        }))
        .unwrap();
        assert_eq!(article.views, 0);
        assert_eq!(article.view_trend, 0);
        assert_eq!(article.article_url, "");
    }

    #[test]
    fn test_reddit_post_accepts_posted_at() {
        let post: RedditPost = serde_json::from_value(json!({
            "id": 3,
            "subreddit": "r/space",
            "postedAt": "2026-10-17T12:30:00Z",
            "title": "Auroras tonight",
            "url": "https://reddit.com/r/space/abc",
            "upvotes": 1234,
            "body": null,
            "wikipediaArticleId": 7
        }))
        .unwrap();

        assert_eq!(post.subreddit, "r/space");
        assert_eq!(post.upvotes, 1234);
        assert_eq!(post.body, None);
        assert_eq!(post.created_at.to_rfc3339(), "2026-10-17T12:30:00+00:00");
    }

    #[test]
    fn test_reddit_post_requires_title() {
        let result: Result<RedditPost, _> = serde_json::from_value(json!({
            "subreddit": "r/space",
            "createdAt": "2026-10-17T12:30:00Z",
            "url": "https://reddit.com"
        }));
        assert!(result.is_err());
    }
}
