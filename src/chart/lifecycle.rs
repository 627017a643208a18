//! Ownership of the live tone chart.
//!
//! A [`ChartSurface`] is the region a chart is drawn on (the tone modal). Every
//! [`ToneChart`] built on it is counted while alive, so the "never two charts
//! at once" rule can be checked without a terminal. [`ChartLifecycle`] holds the
//! single slot and always empties it before filling it again.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::histogram::CanonicalHistogram;

pub const X_AXIS_TITLE: &str = "Tone (higher ~= more positive)";
pub const Y_AXIS_TITLE: &str = "# of Articles";
pub const DATASET_LABEL: &str = "Article Count";
pub const OUTLINE_WIDTH: u16 = 1;

/// RGBA color as used by the chart configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Categorical bar color, keyed on the sign of the bin label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    /// `bin < 0`
    Negative,
    /// `bin >= 0`
    Positive,
}

impl BarColor {
    pub fn for_bin(bin: f64) -> Self {
        if bin < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    pub fn fill(self) -> Rgba {
        match self {
            Self::Negative => Rgba::new(214, 40, 40, 0.6),
            Self::Positive => Rgba::new(44, 160, 44, 0.6),
        }
    }

    pub fn outline(self) -> Rgba {
        match self {
            Self::Negative => Rgba::new(214, 40, 40, 1.0),
            Self::Positive => Rgba::new(44, 160, 44, 1.0),
        }
    }
}

/// One rendered bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: u64,
    pub color: BarColor,
}

/// Live-instance accounting for one rendering surface.
#[derive(Debug, Clone, Default)]
pub struct ChartSurface {
    counters: Arc<SurfaceCounters>,
}

#[derive(Debug, Default)]
struct SurfaceCounters {
    live: AtomicUsize,
    peak: AtomicUsize,
    created: AtomicUsize,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charts currently alive on this surface.
    pub fn live_charts(&self) -> usize {
        self.counters.live.load(Ordering::Acquire)
    }

    /// Highest number of simultaneously alive charts ever observed.
    pub fn peak_live_charts(&self) -> usize {
        self.counters.peak.load(Ordering::Acquire)
    }

    /// Total charts ever constructed on this surface.
    pub fn charts_created(&self) -> usize {
        self.counters.created.load(Ordering::Acquire)
    }

    fn acquire(&self) -> LiveGuard {
        let live = self.counters.live.fetch_add(1, Ordering::AcqRel) + 1;
        self.counters.peak.fetch_max(live, Ordering::AcqRel);
        self.counters.created.fetch_add(1, Ordering::AcqRel);
        LiveGuard {
            counters: Arc::clone(&self.counters),
        }
    }
}

#[derive(Debug)]
struct LiveGuard {
    counters: Arc<SurfaceCounters>,
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A constructed bar chart. Dropping it releases its place on the surface.
#[derive(Debug)]
pub struct ToneChart {
    pub bars: Vec<ChartBar>,
    pub caption: String,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub dataset_label: &'static str,
    pub outline_width: u16,
    pub show_legend: bool,
    pub begin_at_zero: bool,
    _guard: LiveGuard,
}

impl ToneChart {
    fn build(surface: &ChartSurface, histogram: &CanonicalHistogram, title: &str) -> Self {
        let bars = histogram
            .bins
            .iter()
            .map(|b| ChartBar {
                label: format_bin(b.bin),
                value: b.count,
                color: BarColor::for_bin(b.bin),
            })
            .collect();

        Self {
            bars,
            caption: format!(
                "Tone Chart: {} (Data from {}, timespan: {})",
                title, histogram.query_date, histogram.timespan
            ),
            x_axis_title: X_AXIS_TITLE,
            y_axis_title: Y_AXIS_TITLE,
            dataset_label: DATASET_LABEL,
            outline_width: OUTLINE_WIDTH,
            show_legend: false,
            begin_at_zero: true,
            _guard: surface.acquire(),
        }
    }

    /// Largest bar value, used to scale the y axis from zero.
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

/// Render a bin value without a trailing `.0` and without a negative zero.
fn format_bin(bin: f64) -> String {
    if bin == 0.0 {
        "0".to_string()
    } else {
        bin.to_string()
    }
}

/// Holder of the one chart slot on a surface.
#[derive(Debug)]
pub struct ChartLifecycle {
    surface: ChartSurface,
    current: Option<ToneChart>,
}

impl ChartLifecycle {
    pub fn new(surface: ChartSurface) -> Self {
        Self {
            surface,
            current: None,
        }
    }

    /// Destroy any existing chart, then build a new one from `histogram`.
    pub fn render(&mut self, histogram: &CanonicalHistogram, title: &str) -> &ToneChart {
        self.destroy();
        tracing::debug!(bins = histogram.bins.len(), title, "Rendering tone chart");
        self.current.insert(ToneChart::build(&self.surface, histogram, title))
    }

    /// Release the current chart. No-op when the slot is empty.
    pub fn destroy(&mut self) {
        if let Some(chart) = self.current.take() {
            tracing::trace!(bars = chart.bars.len(), "Destroying tone chart");
            drop(chart);
        }
    }

    pub fn current(&self) -> Option<&ToneChart> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }
}

impl Default for ChartLifecycle {
    fn default() -> Self {
        Self::new(ChartSurface::new())
    }
}
