use chrono::NaiveDate;
use serde_json::Value;

use super::{next_generation, PanelState};
use crate::api::{ApiClient, ApiError};
use crate::model::Article;
use crate::trend::{classify, TrendIndicator};
use crate::util::{format_count, strip_control_chars};

pub const ARTICLES_EMPTY_MESSAGE: &str = "No articles found.";
pub const ARTICLES_FAILED_MESSAGE: &str = "Failed to load articles.";

/// One rendered row of the trending list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRow {
    pub id: String,
    pub title: String,
    pub article_url: String,
    /// e.g. `"12,345 views"`
    pub views_text: String,
    pub indicator: TrendIndicator,
}

impl ArticleRow {
    pub fn from_article(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: strip_control_chars(&article.title).into_owned(),
            article_url: article.article_url.clone(),
            views_text: format!("{} views", format_count(article.views)),
            indicator: classify(article.view_trend, article.views),
        }
    }
}

/// Actions a row can request. The controller decides what each one does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleEvent {
    DiscussionRequested { id: String, title: String },
    ToneChartRequested { id: String, title: String },
    OpenExternal { url: String },
}

/// The trending article list.
#[derive(Debug, Default)]
pub struct ArticleListPanel {
    state: PanelState<Vec<ArticleRow>>,
    selected: usize,
    generation: u64,
}

impl ArticleListPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState<Vec<ArticleRow>> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loaded rows, or an empty slice in any other state.
    pub fn rows(&self) -> &[ArticleRow] {
        self.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&ArticleRow> {
        self.rows().get(self.selected)
    }

    /// Enter Loading and return the generation the response must carry.
    pub fn begin(&mut self) -> u64 {
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
                "Discarding stale article list response"
            );
            return false;
        }

        self.selected = 0;
        self.state = match result {
            Ok(body) => decode_rows(body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load articles");
                PanelState::Error(ARTICLES_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Fetch and apply in one call.
    pub async fn load(&mut self, api: &ApiClient, date: NaiveDate) -> bool {
        let generation = self.begin();
        let result = api.fetch_trending_articles(date).await;
        self.complete(generation, result)
    }

    pub fn select_next(&mut self) {
        let len = self.rows().len();
        if len > 0 {
            self.selected = self.selected.saturating_add(1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn discussion_request(&self) -> Option<ArticleEvent> {
        self.selected_row()
            .map(|row| ArticleEvent::DiscussionRequested {
                id: row.id.clone(),
                title: row.title.clone(),
            })
    }

    pub fn tone_chart_request(&self) -> Option<ArticleEvent> {
        self.selected_row()
            .map(|row| ArticleEvent::ToneChartRequested {
                id: row.id.clone(),
                title: row.title.clone(),
            })
    }

    pub fn open_request(&self) -> Option<ArticleEvent> {
        self.selected_row()
            .filter(|row| !row.article_url.is_empty())
            .map(|row| ArticleEvent::OpenExternal {
                url: row.article_url.clone(),
            })
    }
}

fn decode_rows(body: Value) -> PanelState<Vec<ArticleRow>> {
    if !body.is_array() {
        tracing::error!(kind = json_kind(&body), "Article list response is not an array");
        return PanelState::Error(ARTICLES_FAILED_MESSAGE.to_string());
    }

    match serde_json::from_value::<Vec<Article>>(body) {
        Ok(articles) if articles.is_empty() => {
            PanelState::Error(ARTICLES_EMPTY_MESSAGE.to_string())
        }
        Ok(articles) => {
            tracing::info!(count = articles.len(), "Loaded trending articles");
            PanelState::Loaded(articles.iter().map(ArticleRow::from_article).collect())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to decode article list");
            PanelState::Error(ARTICLES_FAILED_MESSAGE.to_string())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
