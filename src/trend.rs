//! View-trend classification.
//!
//! Buckets a signed view delta, relative to the article's total views, into
//! one of seven coarse indicators rendered as arrow glyphs in the article list.

/// Ratio at or above which a trend is shown with three arrows.
pub const STRONG_RATIO: f64 = 0.5;
/// Ratio at or above which a trend is shown with two arrows.
pub const DOUBLE_RATIO: f64 = 0.25;
/// Ratio at or above which a trend is shown with a single arrow.
pub const SINGLE_RATIO: f64 = 0.075;

/// Coarse, sign-and-magnitude bucketed trend of an article's page views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendIndicator {
    StrongUp,
    DoubleUp,
    Up,
    Flat,
    Down,
    DoubleDown,
    StrongDown,
}

impl TrendIndicator {
    /// Arrow glyph shown next to the view count.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::StrongUp => "↑↑↑",
            Self::DoubleUp => "↑↑",
            Self::Up => "↑",
            Self::Flat => "―",
            Self::Down => "↓",
            Self::DoubleDown => "↓↓",
            Self::StrongDown => "↓↓↓",
        }
    }

    pub fn is_rising(self) -> bool {
        matches!(self, Self::StrongUp | Self::DoubleUp | Self::Up)
    }

    pub fn is_falling(self) -> bool {
        matches!(self, Self::StrongDown | Self::DoubleDown | Self::Down)
    }
}

/// Classify a view delta against the total view count.
///
/// The ratio `|view_trend| / views` is compared against the thresholds from
/// highest to lowest; each threshold is inclusive. The direction comes from
/// `view_trend > 0`, so any non-positive delta that clears a threshold lands in
/// the falling family.
///
/// An article with zero views has no meaningful ratio and is reported as
/// [`TrendIndicator::Flat`].
pub fn classify(view_trend: i64, views: u64) -> TrendIndicator {
    if views == 0 {
        return TrendIndicator::Flat;
    }

    let ratio = view_trend.unsigned_abs() as f64 / views as f64;
    let rising = view_trend > 0;

    if ratio >= STRONG_RATIO {
        if rising {
            TrendIndicator::StrongUp
        } else {
            TrendIndicator::StrongDown
        }
    } else if ratio >= DOUBLE_RATIO {
        if rising {
            TrendIndicator::DoubleUp
        } else {
            TrendIndicator::DoubleDown
        }
    } else if ratio >= SINGLE_RATIO {
        if rising {
            TrendIndicator::Up
        } else {
            TrendIndicator::Down
        }
    } else {
        TrendIndicator::Flat
    }
}
