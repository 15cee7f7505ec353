//! Terminal styling for CLI error output.
//!
//! `console` disables styling automatically when stdout/stderr is not a
//! terminal or `NO_COLOR` is set.

use console::{style, StyledObject};

/// Style for an error headline.
pub fn error_label(text: &str) -> StyledObject<&str> {
    style(text).red().bold()
}

