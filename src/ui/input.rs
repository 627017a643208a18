//! Input handling for the TUI.
//!
//! The help overlay captures every key while visible. Otherwise keys are
//! resolved through the keybinding registry for the current context (tone
//! modal, article list or discussion feed) with Global as fallback.

use crate::app::{App, AppEvent, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{
    dispatch_article_event, open_external, spawn_articles_load, spawn_theme_save,
};
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    let context = app.key_context();
    let action = app.keybindings.action_for_key(code, modifiers, context);

    if context == KbContext::ToneModal {
        return Ok(handle_modal_input(app, action, event_tx));
    }

    match action {
        Some(KbAction::Quit) => return Ok(Action::Quit),
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::CycleFocus) => app.cycle_focus(),
        Some(KbAction::OpenDiscussion) => {
            if let Some(event) = app.articles.discussion_request() {
                dispatch_article_event(app, event, event_tx);
            }
        }
        Some(KbAction::OpenToneChart) => {
            if let Some(event) = app.articles.tone_chart_request() {
                dispatch_article_event(app, event, event_tx);
            }
        }
        Some(KbAction::OpenInBrowser) => handle_open_in_browser(app, event_tx),
        Some(KbAction::Reload) => {
            spawn_articles_load(app, event_tx);
            app.set_status("Reloading trending articles...");
        }
        Some(KbAction::ToggleTheme) => toggle_theme(app, event_tx),
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        // Esc outside the modal has nothing to close
        Some(KbAction::CloseModal) | None => {}
    }

    Ok(Action::Continue)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// While the tone modal is open the panels underneath ignore navigation.
fn handle_modal_input(
    app: &mut App,
    action: Option<KbAction>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::CloseModal) => app.close_tone_modal(),
        Some(KbAction::ToggleTheme) => toggle_theme(app, event_tx),
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Action::Continue
}

fn handle_open_in_browser(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    match app.focus {
        Focus::Articles => match app.articles.open_request() {
            Some(event) => dispatch_article_event(app, event, event_tx),
            None if app.articles.selected_row().is_some() => {
                app.set_status("Article has no link");
            }
            None => {}
        },
        Focus::Discussion => {
            if let Some(url) = app.discussion.selected_url().map(str::to_owned) {
                open_external(app, &url);
            }
        }
    }
}

fn toggle_theme(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let variant = app.toggle_theme();
    spawn_theme_save(app, event_tx);
    app.set_status(format!("Theme: {}", variant.name()));
}
