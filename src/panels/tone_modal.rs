use serde_json::Value;

use super::next_generation;
use crate::api::{ApiClient, ApiError};
use crate::chart::{ingest_value, ChartLifecycle, ChartSurface, Ingested, ToneChart};

pub const TONE_ERROR_MESSAGE: &str = "Error loading tone data.";
pub const NO_TONE_DATA_MESSAGE: &str = "No tone data available.";

/// Visibility and content of the tone-chart overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Loading { title: String },
    Loaded { caption: String },
    Error { message: String },
}

/// Modal overlay holding the single tone chart.
///
/// The chart is destroyed before every open and on every close, and `close`
/// advances the generation so a response still in flight is dropped rather
/// than reopening the modal.
#[derive(Debug)]
pub struct ToneModalPanel {
    state: ModalState,
    chart: ChartLifecycle,
    generation: u64,
    title: String,
}

impl ToneModalPanel {
    pub fn new(surface: ChartSurface) -> Self {
        Self {
            state: ModalState::Hidden,
            chart: ChartLifecycle::new(surface),
            generation: 0,
            title: String::new(),
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Hidden
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The live chart, present only in the Loaded state.
    pub fn chart(&self) -> Option<&ToneChart> {
        self.chart.current()
    }

    pub fn surface(&self) -> &ChartSurface {
        self.chart.surface()
    }

    /// Show the modal in Loading for `title`. Any previous chart is destroyed first.
    pub fn open(&mut self, article_id: &str, title: &str) -> u64 {
        self.chart.destroy();
        self.title = title.to_string();
        self.state = ModalState::Loading {
            title: title.to_string(),
        };
        tracing::debug!(article_id, title, "Opening tone chart");
        next_generation(&mut self.generation)
    }

    /// Apply a fetch result. Returns false when the result was stale and dropped.
    pub fn complete(&mut self, generation: u64, result: Result<Value, ApiError>) -> bool {
        if generation != self.generation || !matches!(self.state, ModalState::Loading { .. }) {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale tone chart response"
            );
            return false;
        }

        let ingested = match result {
            Ok(body) => ingest_value(body).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        self.state = match ingested {
            Ok(Ingested::Histogram(histogram)) => {
                let chart = self.chart.render(&histogram, &self.title);
                ModalState::Loaded {
                    caption: chart.caption.clone(),
                }
            }
            Ok(Ingested::Empty) => ModalState::Error {
                message: NO_TONE_DATA_MESSAGE.to_string(),
            },
            Err(cause) => {
                tracing::error!(error = %cause, title = %self.title, "Failed to load tone chart");
                ModalState::Error {
                    message: TONE_ERROR_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    /// Hide the modal and release the chart.
    pub fn close(&mut self) {
        self.chart.destroy();
        self.state = ModalState::Hidden;
        next_generation(&mut self.generation);
    }

    /// Open, fetch and apply in one call.
    pub async fn load(&mut self, api: &ApiClient, article_id: &str, title: &str) -> bool {
        let generation = self.open(article_id, title);
        let result = api.fetch_tone_chart(article_id).await;
        self.complete(generation, result)
    }
}

impl Default for ToneModalPanel {
    fn default() -> Self {
        Self::new(ChartSurface::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "histogram": [
                {"bin": -3, "count": 2},
                {"bin": 0, "count": 5},
                {"bin": 2, "count": 4}
            ],
            "query_date": "2026-10-17",
            "timespan": "1d"
        })
    }

    #[test]
    fn test_open_shows_loading() {
        let mut modal = ToneModalPanel::default();
        modal.open("1", "Aurora");
        assert_eq!(
            modal.state(),
            &ModalState::Loading {
                title: "Aurora".into()
            }
        );
        assert!(modal.is_open());
    }

    #[test]
    fn test_plain_document_renders_chart() {
        let mut modal = ToneModalPanel::default();
        let g = modal.open("1", "Aurora");
        assert!(modal.complete(g, Ok(document())));

        assert_eq!(
            modal.state(),
            &ModalState::Loaded {
                caption: "Tone Chart: Aurora (Data from 2026-10-17, timespan: 1d)".into()
            }
        );
        let chart = modal.chart().unwrap();
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(modal.surface().live_charts(), 1);
    }

    #[test]
    fn test_wrapped_document_renders_same_chart() {
        let wrapped = json!({ "asString": document().to_string() });

        let mut plain = ToneModalPanel::default();
        let g = plain.open("1", "Aurora");
        plain.complete(g, Ok(document()));

        let mut modal = ToneModalPanel::default();
        let g = modal.open("1", "Aurora");
        modal.complete(g, Ok(wrapped));

        assert_eq!(modal.state(), plain.state());
        assert_eq!(modal.chart().unwrap().bars, plain.chart().unwrap().bars);
    }

    #[test]
    fn test_empty_histogram_has_no_chart() {
        let mut modal = ToneModalPanel::default();
        let g = modal.open("1", "Aurora");
        modal.complete(g, Ok(json!({"histogram": []})));

        assert_eq!(
            modal.state(),
            &ModalState::Error {
                message: "No tone data available.".into()
            }
        );
        assert!(modal.chart().is_none());
        assert_eq!(modal.surface().live_charts(), 0);
    }

    #[test]
    fn test_malformed_wrapper_is_error() {
        let mut modal = ToneModalPanel::default();
        let g = modal.open("1", "Aurora");
        modal.complete(g, Ok(json!({"asString": "{not json"})));

        assert_eq!(
            modal.state(),
            &ModalState::Error {
                message: TONE_ERROR_MESSAGE.into()
            }
        );
        assert_eq!(modal.surface().live_charts(), 0);
    }

    #[test]
    fn test_http_failure_is_error() {
        let mut modal = ToneModalPanel::default();
        let g = modal.open("1", "Aurora");
        modal.complete(g, Err(ApiError::HttpStatus(404)));
        assert_eq!(
            modal.state(),
            &ModalState::Error {
                message: TONE_ERROR_MESSAGE.into()
            }
        );
    }

    #[test]
    fn test_close_during_load_stays_hidden() {
        let mut modal = ToneModalPanel::default();
        let g = modal.open("1", "Aurora");
        modal.close();

        assert!(!modal.complete(g, Ok(document())));
        assert_eq!(modal.state(), &ModalState::Hidden);
        assert_eq!(modal.surface().charts_created(), 0);
    }

    #[test]
    fn test_latest_open_wins() {
        let mut modal = ToneModalPanel::default();
        let first = modal.open("1", "Aurora");
        let second = modal.open("2", "Comet");

        assert!(!modal.complete(first, Ok(document())));
        assert!(modal.complete(second, Ok(document())));
        match modal.state() {
            ModalState::Loaded { caption } => assert!(caption.contains("Comet")),
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn test_reopen_destroys_previous_chart() {
        let surface = ChartSurface::new();
        let mut modal = ToneModalPanel::new(surface.clone());

        let g = modal.open("1", "Aurora");
        modal.complete(g, Ok(document()));
        assert_eq!(surface.live_charts(), 1);

        let g = modal.open("2", "Comet");
        assert_eq!(surface.live_charts(), 0);
        modal.complete(g, Ok(document()));

        assert_eq!(surface.live_charts(), 1);
        assert_eq!(surface.peak_live_charts(), 1);
    }

    #[test]
    fn test_close_releases_chart() {
        let surface = ChartSurface::new();
        let mut modal = ToneModalPanel::new(surface.clone());
        let g = modal.open("1", "Aurora");
        modal.complete(g, Ok(document()));

        modal.close();
        modal.close();

        assert_eq!(surface.live_charts(), 0);
        assert!(!modal.is_open());
    }
}
