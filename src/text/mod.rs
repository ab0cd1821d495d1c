//! # Text Layout
//!
//! Greedy line breaking on whitespace, measured with real font metrics from
//! the [`FontContext`]. Explicit `\n` always starts a new line. A word wider
//! than the available width is never split; it gets a line of its own and
//! overflows.
//!
//! All widths here are in points.

use crate::font::{FontContext, FontKey};

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Total advance width of the line.
    pub width: f64,
}

#[derive(Default)]
pub struct TextLayout;

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break `text` into lines no wider than `max_width` where possible.
    ///
    /// Runs of whitespace inside a paragraph collapse to a single space.
    /// Empty input yields one empty line.
    pub fn break_into_lines(
        &self,
        fonts: &FontContext,
        text: &str,
        max_width: f64,
        font_size: f64,
        key: &FontKey,
    ) -> Vec<BrokenLine> {
        let space = fonts.measure_string(" ", key, font_size);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0;

            for word in paragraph.split_whitespace() {
                let word_width = fonts.measure_string(word, key, font_size);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_width;
                    continue;
                }
                let candidate = current_width + space + word_width;
                if candidate <= max_width + 1e-9 {
                    current.push(' ');
                    current.push_str(word);
                    current_width = candidate;
                } else {
                    lines.push(BrokenLine {
                        text: std::mem::take(&mut current),
                        width: current_width,
                    });
                    current.push_str(word);
                    current_width = word_width;
                }
            }

            lines.push(BrokenLine {
                text: current,
                width: current_width,
            });
        }

        lines
    }
}
