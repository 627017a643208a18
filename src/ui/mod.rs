//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background fetch result routing
//! - `render` - Layout and overlay dispatch
//! - `helpers` - Task spawning and browser hand-off
//! - `articles` - Trending article list widget
//! - `discussion` - Discussion feed widget
//! - `tone_modal` - Tone chart overlay
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod articles;
mod discussion;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod status;
mod tone_modal;

pub use loop_runner::{run, Action};
