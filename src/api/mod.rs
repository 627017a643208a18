//! HTTP access to the dashboard backend.

mod client;

pub use client::{trending_path, ApiClient, ApiError, TrendingEndpoint, DEFAULT_BASE_URL};
