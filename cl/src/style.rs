//! Terminal styling
//!
//! Rendering never calls the color library directly; it goes through a
//! [`Styler`] so lines can be produced and checked without a terminal.

use colored::{Color, Colorize};

/// Pure text styling function
pub trait Styler: Send + Sync {
    /// Wrap `text` in the given foreground color
    fn paint(&self, color: Color, text: &str) -> String;

    /// Wrap `text` in the given foreground color, bold
    fn bold(&self, color: Color, text: &str) -> String;
}

/// ANSI styling via `colored`
///
/// Honors `colored`'s global switches (`NO_COLOR`, `CLICOLOR`, tty detection
/// and `colored::control::set_override`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredStyler;

impl Styler for ColoredStyler {
    fn paint(&self, color: Color, text: &str) -> String {
        text.color(color).to_string()
    }

    fn bold(&self, color: Color, text: &str) -> String {
        text.color(color).bold().to_string()
    }
}

/// Identity styling, for tests and non-terminal output
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, _color: Color, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, _color: Color, text: &str) -> String {
        text.to_string()
    }
}
