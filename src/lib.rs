//! Terminal dashboard for trending Wikipedia articles.
//!
//! The binary wires these modules together; they are exposed as a library so
//! the integration tests can drive the panels against a mock backend.

pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod keybindings;
pub mod model;
pub mod panels;
pub mod preferences;
pub mod storage;
pub mod theme;
pub mod trend;
pub mod ui;
pub mod util;
