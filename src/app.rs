use crate::api::{ApiClient, ApiError};
use crate::chart::ChartSurface;
use crate::keybindings::{Context as KbContext, KeybindingRegistry};
use crate::panels::{ArticleListPanel, DiscussionFeedPanel, ToneModalPanel};
use crate::storage::Database;
use crate::theme::{StyleMap, ThemeVariant};
use chrono::NaiveDate;
use ratatui::style::Style;
use serde_json::Value;
use std::borrow::Cow;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Focus and Events
// ============================================================================

/// Which side panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Articles,
    Discussion,
}

/// Events from background tasks.
///
/// Every fetch result carries the generation its panel handed out when the
/// request began; the panel drops results whose generation is no longer current.
#[derive(Debug)]
pub enum AppEvent {
    ArticlesLoaded {
        generation: u64,
        result: Result<Value, ApiError>,
    },
    ToneChartLoaded {
        generation: u64,
        result: Result<Value, ApiError>,
    },
    PostsLoaded {
        generation: u64,
        result: Result<Value, ApiError>,
    },
    /// A background task panicked.
    ///
    /// Fetch panics reach their panel as an error result instead; this is
    /// for tasks with no panel of their own.
    ///
    /// - `task`: Name of the task that panicked (e.g., "theme_save")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked {
        task: &'static str,
        error: String,
    },
    /// Writing the theme preference failed. The in-memory theme is unchanged.
    ThemeSaveFailed {
        error: String,
    },
}

// ============================================================================
// App
// ============================================================================

/// Dashboard state, owned by the event loop task.
pub struct App {
    pub api: ApiClient,
    pub db: Database,
    /// Day whose trending list is shown.
    pub date: NaiveDate,

    pub articles: ArticleListPanel,
    pub tone_modal: ToneModalPanel,
    pub discussion: DiscussionFeedPanel,
    pub focus: Focus,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
    /// Scroll offset in the help screen for long keybinding lists.
    pub help_scroll_offset: usize,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,

    /// In-flight fetch per panel. A new request aborts the previous one.
    pub articles_handle: Option<JoinHandle<()>>,
    pub tone_handle: Option<JoinHandle<()>>,
    pub posts_handle: Option<JoinHandle<()>>,
    /// Most recent theme write. Each write waits for this one before touching the store.
    pub theme_save_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        api: ApiClient,
        db: Database,
        date: NaiveDate,
        theme_variant: ThemeVariant,
        keybindings: KeybindingRegistry,
    ) -> Self {
        Self {
            api,
            db,
            date,
            articles: ArticleListPanel::new(),
            tone_modal: ToneModalPanel::new(ChartSurface::new()),
            discussion: DiscussionFeedPanel::new(),
            focus: Focus::Articles,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            spinner_frame: 0,
            articles_handle: None,
            tone_handle: None,
            posts_handle: None,
            theme_save_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a theme variant, rebuilding the style map.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Flip between light and dark. Returns the new variant so the caller can persist it.
    pub fn toggle_theme(&mut self) -> ThemeVariant {
        let next = self.theme_variant.toggled();
        self.set_theme(next);
        next
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Articles => Focus::Discussion,
            Focus::Discussion => Focus::Articles,
        };
    }

    /// Keybinding context for the current screen state.
    pub fn key_context(&self) -> KbContext {
        if self.tone_modal.is_open() {
            return KbContext::ToneModal;
        }
        match self.focus {
            Focus::Articles => KbContext::ArticleList,
            Focus::Discussion => KbContext::Discussion,
        }
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Articles => self.articles.select_prev(),
            Focus::Discussion => self.discussion.select_prev(),
        }
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Articles => self.articles.select_next(),
            Focus::Discussion => self.discussion.select_next(),
        }
    }

    /// Whether any panel is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.articles.state().is_loading()
            || self.discussion.state().is_loading()
            || matches!(
                self.tone_modal.state(),
                crate::panels::ModalState::Loading { .. }
            )
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Wait for queued theme writes so the stored value matches the screen.
    pub async fn finish_theme_save(&mut self) {
        if let Some(handle) = self.theme_save_handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Theme save task did not finish");
            }
        }
    }

    /// Hide the tone modal and abandon its fetch.
    pub fn close_tone_modal(&mut self) {
        if let Some(handle) = self.tone_handle.take() {
            handle.abort();
            tracing::debug!("Aborted tone chart load on modal close");
        }
        self.tone_modal.close();
    }
}

/// Abort all in-flight fetches when the App goes away.
impl Drop for App {
    fn drop(&mut self) {
        for (name, slot) in [
            ("articles", &mut self.articles_handle),
            ("tone_chart", &mut self.tone_handle),
            ("posts", &mut self.posts_handle),
        ] {
            if let Some(handle) = slot.take() {
                handle.abort();
                tracing::debug!(task = name, "Aborted fetch on App drop");
            }
        }
    }
}
