//! Tone histogram ingestion.
//!
//! The tone-chart endpoint answers either with the histogram document itself
//! or with that document serialized a second time, wrapped as
//! `{"asString": "<json text>"}` (or, from some deployments, as a bare JSON
//! string). [`ToneHistogramRaw::from_value`] tells the two apart once and
//! [`ingest`] reduces both to a [`CanonicalHistogram`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallback shown when the payload carries no query date.
pub const UNKNOWN_DATE: &str = "Unknown Date";
/// Fallback shown when the payload carries no timespan.
pub const UNKNOWN_TIMESPAN: &str = "?";

#[derive(Debug, Error)]
pub enum IngestError {
    /// Nested JSON text, or the histogram document itself, is malformed.
    #[error("Malformed tone histogram: {0}")]
    Parse(#[from] serde_json::Error),
    /// The payload is neither a histogram document nor a wrapped one.
    #[error("Unexpected tone histogram payload: {0}")]
    UnexpectedShape(&'static str),
}

/// One bar of the histogram: a signed tone value and how many items fell in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneBin {
    pub bin: f64,
    pub count: u64,
}

/// The histogram document as produced upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramDocument {
    #[serde(default)]
    pub histogram: Option<Vec<ToneBin>>,
    #[serde(default)]
    pub query_date: Option<String>,
    #[serde(default)]
    pub timespan: Option<String>,
}

/// Raw payload, discriminated at the ingestion boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ToneHistogramRaw {
    /// The document arrived as a JSON object.
    Plain(Value),
    /// The document arrived as JSON text that still has to be parsed.
    Wrapped(String),
}

impl ToneHistogramRaw {
    /// Resolve the payload shape. Called once; nothing downstream re-checks it.
    pub fn from_value(value: Value) -> Result<Self, IngestError> {
        match value {
            Value::Object(mut map) => match map.remove("asString") {
                Some(Value::String(text)) => Ok(Self::Wrapped(text)),
                Some(other) => {
                    // `asString` present but not text: treat the key as data.
                    map.insert("asString".to_string(), other);
                    Ok(Self::Plain(Value::Object(map)))
                }
                None => Ok(Self::Plain(Value::Object(map))),
            },
            Value::String(text) => Ok(Self::Wrapped(text)),
            Value::Null => Ok(Self::Plain(Value::Object(Default::default()))),
            _ => Err(IngestError::UnexpectedShape(
                "expected an object or JSON text",
            )),
        }
    }
}

/// Normalized histogram, the only shape the chart ever sees.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalHistogram {
    pub bins: Vec<ToneBin>,
    pub query_date: String,
    pub timespan: String,
}

impl CanonicalHistogram {
    /// Bin labels in payload order.
    pub fn labels(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.bin)
    }

    /// Counts in payload order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.bins.iter().map(|b| b.count)
    }
}

/// Outcome of ingestion. `Empty` is a display state, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Ingested {
    Histogram(CanonicalHistogram),
    Empty,
}

/// Reduce a raw payload to a canonical histogram or to [`Ingested::Empty`].
///
/// # Errors
///
/// Returns [`IngestError::Parse`] when wrapped text is not valid JSON or when
/// the document has malformed entries (non-numeric bins, negative counts).
pub fn ingest(raw: ToneHistogramRaw) -> Result<Ingested, IngestError> {
    let document: HistogramDocument = match raw {
        ToneHistogramRaw::Plain(value) => serde_json::from_value(value)?,
        ToneHistogramRaw::Wrapped(text) => {
            let nested: Value = serde_json::from_str(&text)?;
            if nested.is_null() {
                HistogramDocument::default()
            } else {
                serde_json::from_value(nested)?
            }
        }
    };

    let bins = match document.histogram {
        Some(bins) if !bins.is_empty() => bins,
        _ => return Ok(Ingested::Empty),
    };

    Ok(Ingested::Histogram(CanonicalHistogram {
        bins,
        query_date: document
            .query_date
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        timespan: document
            .timespan
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TIMESPAN.to_string()),
    }))
}

/// Convenience for callers holding the verbatim response body.
pub fn ingest_value(value: Value) -> Result<Ingested, IngestError> {
    ingest(ToneHistogramRaw::from_value(value)?)
}
