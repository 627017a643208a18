//! Application event handling.
//!
//! Routes background fetch results to their panels. Each panel checks the
//! generation itself, so a stale result is simply dropped here.

use crate::app::{App, AppEvent};
use crate::panels::ModalState;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ArticlesLoaded { generation, result } => {
            if app.articles.complete(generation, result) {
                app.articles_handle = None;
                if let Some(rows) = app.articles.state().loaded() {
                    tracing::info!(count = rows.len(), date = %app.date, "Articles loaded");
                }
            } else {
                tracing::debug!(generation, "Dropped stale articles result");
            }
        }
        AppEvent::ToneChartLoaded { generation, result } => {
            if app.tone_modal.complete(generation, result) {
                app.tone_handle = None;
                if let ModalState::Loaded { caption } = app.tone_modal.state() {
                    tracing::debug!(caption = %caption, "Tone chart rendered");
                }
            } else {
                tracing::debug!(generation, "Dropped stale tone chart result");
            }
        }
        AppEvent::PostsLoaded { generation, result } => {
            if app.discussion.complete(generation, result) {
                app.posts_handle = None;
            } else {
                tracing::debug!(generation, "Dropped stale posts result");
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
        AppEvent::ThemeSaveFailed { error } => {
            tracing::warn!(error = %error, "Failed to save theme preference");
            app.set_status("Theme applied but could not be saved");
        }
    }
}
