//! Tone chart pipeline: payload ingestion and the single live chart slot.

pub mod histogram;
pub mod lifecycle;

pub use histogram::{
    ingest, ingest_value, CanonicalHistogram, IngestError, Ingested, ToneBin, ToneHistogramRaw,
};
pub use lifecycle::{BarColor, ChartBar, ChartLifecycle, ChartSurface, Rgba, ToneChart};
