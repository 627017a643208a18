//! Integration tests for the three dashboard panels against a mock backend.
//!
//! Each test starts its own wiremock server, so endpoints can fail or succeed
//! independently and the panels can be checked for isolation.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use trendboard::api::{ApiClient, TrendingEndpoint};
use trendboard::chart::ChartSurface;
use trendboard::panels::{
    ArticleEvent, ArticleListPanel, DiscussionFeedPanel, ModalState, PanelState, ToneModalPanel,
    ARTICLES_EMPTY_MESSAGE, NO_TONE_DATA_MESSAGE, TONE_ERROR_MESSAGE,
};
use trendboard::trend::TrendIndicator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), TrendingEndpoint::Dated, Duration::from_secs(5)).unwrap()
}

fn histogram() -> serde_json::Value {
    json!({
        "histogram": [
            {"bin": -4, "count": 3},
            {"bin": 0, "count": 12},
            {"bin": 3, "count": 8}
        ],
        "query_date": "2026-03-07",
        "timespan": "24h"
    })
}

async fn mount_articles(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/trending-topics/2026/03/07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 42, "title": "Aurora", "wikipediaUrl": "https://en.wikipedia.org/wiki/Aurora", "views": 120000, "viewTrend": 90000},
            {"id": "7", "title": "Comet", "views": 5000.0, "viewTrend": -10}
        ])))
        .mount(server)
        .await;
}

// ============================================================================
// Article list
// ============================================================================

#[tokio::test]
async fn test_article_list_loads_dated_endpoint() {
    let server = MockServer::start().await;
    mount_articles(&server).await;

    let mut panel = ArticleListPanel::new();
    assert!(panel.load(&client(&server), day()).await);

    let rows = panel.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Aurora");
    assert_eq!(rows[0].views_text, "120,000 views");
    assert!(rows[0].indicator.is_rising());
    assert_eq!(rows[1].id, "7");
    assert_eq!(rows[1].indicator, TrendIndicator::Flat);
}

#[tokio::test]
async fn test_empty_article_list_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trending-topics/2026/03/07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut panel = ArticleListPanel::new();
    panel.load(&client(&server), day()).await;

    assert_eq!(panel.state().error(), Some(ARTICLES_EMPTY_MESSAGE));
}

// ============================================================================
// Panel isolation
// ============================================================================

#[tokio::test]
async fn test_tone_failure_does_not_affect_other_panels() {
    let server = MockServer::start().await;
    mount_articles(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/article-tone-chart/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/latest-reddit-posts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "subreddit": "r/space",
                "createdAt": "2026-03-07T08:30:00Z",
                "title": "Incredible aurora last night",
                "url": "https://reddit.com/r/space/xyz",
                "upvotes": 2048,
                "body": null
            }
        ])))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut articles = ArticleListPanel::new();
    articles.load(&api, day()).await;

    let Some(ArticleEvent::ToneChartRequested { id, title }) = articles.tone_chart_request()
    else {
        panic!("expected a tone chart request");
    };

    let mut modal = ToneModalPanel::new(ChartSurface::new());
    modal.load(&api, &id, &title).await;
    assert_eq!(
        modal.state(),
        &ModalState::Error {
            message: TONE_ERROR_MESSAGE.to_string()
        }
    );

    let mut discussion = DiscussionFeedPanel::new();
    discussion.load(&api, &id, &title).await;

    assert_eq!(articles.rows().len(), 2);
    assert_eq!(discussion.heading(), Some("Latest Discussions: Aurora"));
    let posts = discussion.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].header, "r/space \u{2022} 2026-03-07");
    assert_eq!(posts[0].upvotes, "2,048");
    assert_eq!(posts[0].body, None);
}

#[tokio::test]
async fn test_posts_failure_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/latest-reddit-posts/9"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut discussion = DiscussionFeedPanel::new();
    discussion.load(&client(&server), "9", "Eclipse").await;

    assert_eq!(
        discussion.state(),
        &PanelState::Error("Failed to load posts: HTTP error! Status: 503".to_string())
    );
}

#[tokio::test]
async fn test_long_post_body_truncated() {
    let server = MockServer::start().await;
    let body = "word ".repeat(60);
    Mock::given(method("GET"))
        .and(path("/api/latest-reddit-posts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "subreddit": "r/science",
                "createdAt": "2026-03-06T23:59:59Z",
                "title": "Thread",
                "url": "https://reddit.com/r/science/1",
                "upvotes": 3,
                "body": body
            }
        ])))
        .mount(&server)
        .await;

    let mut discussion = DiscussionFeedPanel::new();
    discussion.load(&client(&server), "1", "Thread").await;

    let preview = discussion.posts()[0].body.clone().unwrap();
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 203);
}

// ============================================================================
// Tone chart
// ============================================================================

#[tokio::test]
async fn test_wrapped_and_plain_payloads_render_alike() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/article-tone-chart/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(histogram()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/article-tone-chart/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"asString": histogram().to_string()})),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let surface = ChartSurface::new();
    let mut modal = ToneModalPanel::new(surface.clone());

    modal.load(&api, "1", "Aurora").await;
    let plain: Vec<_> = modal.chart().unwrap().bars.clone();
    let caption = modal.chart().unwrap().caption.clone();
    assert_eq!(
        caption,
        "Tone Chart: Aurora (Data from 2026-03-07, timespan: 24h)"
    );

    modal.load(&api, "2", "Aurora").await;
    assert_eq!(modal.chart().unwrap().bars, plain);

    // The first chart was destroyed before the second was built
    assert_eq!(surface.live_charts(), 1);
    assert_eq!(surface.peak_live_charts(), 1);
    assert_eq!(surface.charts_created(), 2);
}

#[tokio::test]
async fn test_null_tone_payload_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/article-tone-chart/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"asString": "null"})))
        .mount(&server)
        .await;

    let surface = ChartSurface::new();
    let mut modal = ToneModalPanel::new(surface.clone());
    modal.load(&client(&server), "5", "Quiet").await;

    assert_eq!(
        modal.state(),
        &ModalState::Error {
            message: NO_TONE_DATA_MESSAGE.to_string()
        }
    );
    assert_eq!(surface.live_charts(), 0);
}

#[tokio::test]
async fn test_top_articles_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/top-articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Only", "articleUrl": "https://en.wikipedia.org/wiki/Only", "views": 0, "viewTrend": 0}
        ])))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri(), TrendingEndpoint::Top, Duration::from_secs(5)).unwrap();
    let mut panel = ArticleListPanel::new();
    panel.load(&api, day()).await;

    assert_eq!(
        panel.open_request(),
        Some(ArticleEvent::OpenExternal {
            url: "https://en.wikipedia.org/wiki/Only".to_string()
        })
    );
}
