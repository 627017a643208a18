//! Utility functions for common operations.
//!
//! - **URL validation**: links from the backend are checked before a browser opens them
//! - **Text processing**: Unicode-aware truncation, count formatting and
//!   control-character stripping for backend-supplied text

mod text;
mod url_validator;

pub use text::{
    display_width, format_count, strip_control_chars, truncate_chars, truncate_to_width, ELLIPSIS,
};
pub use url_validator::{validate_url_for_open, UrlValidationError};
