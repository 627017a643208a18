//! Helper functions for UI operations.
//!
//! Background fetch spawning, panel event dispatch and browser hand-off.

use crate::api::ApiError;
use crate::app::{App, AppEvent};
use crate::panels::ArticleEvent;
use crate::preferences;
use crate::util::validate_url_for_open;
use futures::FutureExt;
use serde_json::Value;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking task would otherwise vanish inside the runtime. The panic
/// message is returned as `Err(String)`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Spawn one backend fetch and forward its result as an `AppEvent`.
///
/// A panic becomes `ApiError::TaskPanicked` so the panel still leaves "Loading".
pub(super) fn spawn_fetch<Fut, W>(
    task: &'static str,
    event_tx: &mpsc::Sender<AppEvent>,
    fetch: Fut,
    wrap: W,
) -> JoinHandle<()>
where
    Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    W: FnOnce(Result<Value, ApiError>) -> AppEvent + Send + 'static,
{
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match catch_task_panic(fetch).await {
            Ok(result) => wrap(result),
            Err(error) => {
                tracing::error!(task, error = %error, "Fetch task panicked");
                wrap(Err(ApiError::TaskPanicked(error)))
            }
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(task, error = %e, "Failed to send fetch result (receiver dropped)");
        }
    })
}

/// (Re)load the trending list for `app.date`, abandoning any load in flight.
pub(super) fn spawn_articles_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.articles_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous articles load");
    }

    let generation = app.articles.begin();
    let api = app.api.clone();
    let date = app.date;
    tracing::debug!(%date, generation, "Spawning articles load");

    app.articles_handle = Some(spawn_fetch(
        "articles",
        event_tx,
        async move { api.fetch_trending_articles(date).await },
        move |result| AppEvent::ArticlesLoaded { generation, result },
    ));
}

/// Open the tone modal for an article and fetch its histogram.
pub(super) fn spawn_tone_load(
    app: &mut App,
    id: String,
    title: &str,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    if let Some(handle) = app.tone_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous tone chart load");
    }

    let generation = app.tone_modal.open(&id, title);
    let api = app.api.clone();
    tracing::debug!(id = %id, generation, "Spawning tone chart load");

    app.tone_handle = Some(spawn_fetch(
        "tone_chart",
        event_tx,
        async move { api.fetch_tone_chart(&id).await },
        move |result| AppEvent::ToneChartLoaded { generation, result },
    ));
}

/// Point the discussion panel at an article and fetch its posts.
pub(super) fn spawn_posts_load(
    app: &mut App,
    id: String,
    title: &str,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    if let Some(handle) = app.posts_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous posts load");
    }

    let generation = app.discussion.begin(title);
    let api = app.api.clone();
    tracing::debug!(id = %id, generation, "Spawning posts load");

    app.posts_handle = Some(spawn_fetch(
        "posts",
        event_tx,
        async move { api.fetch_reddit_posts(&id).await },
        move |result| AppEvent::PostsLoaded { generation, result },
    ));
}

/// Persist the current theme without blocking the loop.
///
/// Writes are chained: each task awaits the previous save first, so the
/// store always ends on the last variant toggled. Only failures are
/// reported back; the in-memory theme is already applied.
pub(super) fn spawn_theme_save(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let previous = app.theme_save_handle.take();
    let db = app.db.clone();
    let variant = app.theme_variant;
    let tx = event_tx.clone();

    app.theme_save_handle = Some(tokio::spawn(async move {
        if let Some(previous) = previous {
            if let Err(e) = previous.await {
                tracing::debug!(error = %e, "Previous theme save did not finish");
            }
        }

        let event = match catch_task_panic(preferences::save_theme(&db, variant)).await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => AppEvent::ThemeSaveFailed {
                error: e.to_string(),
            },
            Err(error) => AppEvent::TaskPanicked {
                task: "theme_save",
                error,
            },
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send theme save result (receiver dropped)");
        }
    }));
}

/// Act on an event raised by the article list.
pub(super) fn dispatch_article_event(
    app: &mut App,
    event: ArticleEvent,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match event {
        ArticleEvent::DiscussionRequested { id, title } => {
            spawn_posts_load(app, id, &title, event_tx);
        }
        ArticleEvent::ToneChartRequested { id, title } => {
            spawn_tone_load(app, id, &title, event_tx);
        }
        ArticleEvent::OpenExternal { url } => open_external(app, &url),
    }
}

/// Hand a link to the system browser.
pub(super) fn open_external(app: &mut App, url: &str) {
    // Validate before open::that() so backend text never reaches a shell handler
    match validate_url_for_open(url) {
        Err(e) => app.set_status(e.to_string()),
        Ok(valid) => {
            if let Err(e) = open::that(valid.as_str()) {
                tracing::warn!(url = %valid, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catch_task_panic_passes_value_through() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_str_message() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_catch_task_panic_formatted_message() {
        let code = 42;
        let result: Result<(), String> =
            catch_task_panic(async move { panic!("failed with {}", code) }).await;
        assert_eq!(result, Err("failed with 42".to_string()));
    }
}
