// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting text into a box.
//!
//! [`fit_text`] wraps a string to a pixel width, truncates it to a maximum number of lines
//! (ending the last kept line with an ellipsis) and, with autoshrink enabled, steps the font
//! size down until the wrapped block fits or the floor size is reached.
//!
//! Fitting is best effort. It never fails; a result that still overflows at the floor size is
//! reported through [`FittedText::fits`].

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{BezPath, Point};
use peniko::Brush;
use smallvec::SmallVec;
use tabula_text::{TextMeasurer, TextStyle};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::geometry::Size;
use crate::mark::{Mark, TextAnchor, TextBaseline, TextMark};

/// Appended to the last kept line when text is truncated.
pub const ELLIPSIS: char = '\u{2026}';

/// Smallest font size the fitter will ever use.
pub const MIN_FONT_SIZE: f64 = 1.0;

const FIT_EPSILON: f64 = 1e-6;

/// Wrapped lines. Most cells and labels need one to three.
pub type Lines = SmallVec<[String; 3]>;

/// Options controlling [`fit_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitOptions {
    /// Font size of the first attempt.
    pub start_font_size: f64,
    /// Floor for autoshrink.
    pub min_font_size: f64,
    /// Maximum number of lines to keep; `None` keeps every wrapped line.
    pub max_lines: Option<usize>,
    /// Whether to step the font size down until the text fits.
    pub autoshrink: bool,
    /// Distance between consecutive baselines as a multiple of the line height.
    pub line_spacing: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            start_font_size: 12.0,
            min_font_size: 6.0,
            max_lines: None,
            autoshrink: true,
            line_spacing: 1.15,
        }
    }
}

impl FitOptions {
    /// Options starting at `start_font_size` and shrinking no further than `min_font_size`.
    pub fn new(start_font_size: f64, min_font_size: f64) -> Self {
        Self {
            start_font_size,
            min_font_size,
            ..Self::default()
        }
    }

    /// Sets the maximum line count.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    /// Enables or disables autoshrink.
    pub fn with_autoshrink(mut self, autoshrink: bool) -> Self {
        self.autoshrink = autoshrink;
        self
    }

    /// Sets the line spacing multiplier.
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// The effective `(start, min)` sizes after clamping.
    fn sizes(&self) -> (f64, f64) {
        let min = if self.min_font_size.is_finite() {
            self.min_font_size.max(MIN_FONT_SIZE)
        } else {
            MIN_FONT_SIZE
        };
        let start = if self.start_font_size.is_finite() {
            self.start_font_size.max(min)
        } else {
            min
        };
        (start, min)
    }

    /// Upper bound on the number of layout attempts `fit_text` makes.
    ///
    /// One attempt per whole point between the start and floor sizes, plus one for the start
    /// size itself and one more when the floor is reached by a fractional step.
    pub fn max_attempts(&self) -> usize {
        if !self.autoshrink {
            return 1;
        }
        let (start, min) = self.sizes();
        let span = start - min;
        let whole = span.floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "span is finite and non-negative; font sizes are small"
        )]
        let steps = whole as usize;
        let fractional = usize::from(span - whole > FIT_EPSILON);
        steps + 1 + fractional
    }
}

/// The result of fitting text into a box.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedText {
    /// Wrapped (and possibly truncated) lines.
    pub lines: Lines,
    /// Font size the lines were laid out at.
    pub font_size: f64,
    /// Whether lines were dropped and an ellipsis appended.
    pub truncated: bool,
    /// Whether the block fits inside the requested box.
    pub fits: bool,
    /// Number of layout attempts made.
    pub attempts: usize,
    /// Width and height of the laid-out block.
    pub size: Size,
    /// Height of a single line at `font_size`.
    pub line_height: f64,
    /// Baseline-to-baseline distance.
    pub line_advance: f64,
}

impl FittedText {
    /// An empty result at the given size.
    pub fn empty(font_size: f64) -> Self {
        Self {
            lines: Lines::new(),
            font_size,
            truncated: false,
            fits: true,
            attempts: 0,
            size: Size::default(),
            line_height: 0.0,
            line_advance: 0.0,
        }
    }

    /// The wrapped text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Vertical offsets (relative to the block center) of each line's middle.
    pub fn line_offsets(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.lines.len();
        let span = if n > 1 {
            (n - 1) as f64 * self.line_advance
        } else {
            0.0
        };
        (0..n).map(move |i| i as f64 * self.line_advance - 0.5 * span)
    }

    /// Emits one text mark per line, the block vertically centered on `pos.y`.
    ///
    /// `style` supplies the font; its size is replaced by [`FittedText::font_size`].
    pub fn marks(
        &self,
        pos: Point,
        anchor: TextAnchor,
        style: &TextStyle,
        fill: &Brush,
        z_index: i32,
        clip: Option<&BezPath>,
    ) -> Vec<Mark> {
        let style = style.with_font_size(self.font_size);
        self.lines
            .iter()
            .zip(self.line_offsets())
            .filter(|(line, _)| !line.is_empty())
            .map(|(line, dy)| {
                Mark::text(
                    z_index,
                    TextMark {
                        pos: Point::new(pos.x, pos.y + dy),
                        text: line.clone(),
                        style: style.clone(),
                        fill: fill.clone(),
                        anchor,
                        baseline: TextBaseline::Middle,
                        clip: clip.cloned(),
                    },
                )
            })
            .collect()
    }
}

struct Attempt {
    lines: Lines,
    truncated: bool,
    size: Size,
    line_height: f64,
    line_advance: f64,
}

impl Attempt {
    fn fits(&self, bounds: Size) -> bool {
        self.size.width <= bounds.width + FIT_EPSILON
            && self.size.height <= bounds.height + FIT_EPSILON
    }
}

/// Fits `text` into a `bounds` box.
///
/// `style` supplies the font family, weight and style; its font size is ignored in favour of
/// the sizes in `options`.
///
/// A single word wider than the box is never broken; it sits on its own line and overflows,
/// which autoshrink may then resolve.
pub fn fit_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    bounds: Size,
    style: &TextStyle,
    options: &FitOptions,
) -> FittedText {
    let (start, min) = options.sizes();
    if text.trim().is_empty() {
        return FittedText::empty(start);
    }

    let width = bounds.width.max(0.0);
    let max_attempts = options.max_attempts();
    let mut font_size = start;
    let mut attempts = 0;
    loop {
        attempts += 1;
        let sized = style.with_font_size(font_size);
        let attempt = layout_lines(measurer, text, width, &sized, options);
        let fits = attempt.fits(bounds);
        let exhausted = font_size <= min || attempts >= max_attempts;
        if fits || !options.autoshrink || exhausted {
            if !fits {
                tracing::trace!(
                    font_size,
                    width = bounds.width,
                    height = bounds.height,
                    "text overflows its box at the smallest allowed size"
                );
            }
            return FittedText {
                lines: attempt.lines,
                font_size,
                truncated: attempt.truncated,
                fits,
                attempts,
                size: attempt.size,
                line_height: attempt.line_height,
                line_advance: attempt.line_advance,
            };
        }
        font_size = (font_size - 1.0).max(min);
    }
}

fn layout_lines(
    measurer: &dyn TextMeasurer,
    text: &str,
    width: f64,
    style: &TextStyle,
    options: &FitOptions,
) -> Attempt {
    let mut lines = wrap_words(measurer, text, width, style);
    let mut truncated = false;
    if let Some(max) = options.max_lines {
        let max = max.max(1);
        if lines.len() > max {
            lines.truncate(max);
            if let Some(last) = lines.pop() {
                lines.push(ellipsize(measurer, &last, width, style));
            }
            truncated = true;
        }
    }

    let line_height = measurer.measure("Mg", style).line_height();
    let line_advance = line_height * options.line_spacing.max(0.0);
    let block_width = lines
        .iter()
        .map(|l| measurer.measure(l, style).advance_width)
        .fold(0.0_f64, f64::max);
    let block_height = match lines.len() {
        0 => 0.0,
        n => line_height + (n - 1) as f64 * line_advance,
    };

    Attempt {
        lines,
        truncated,
        size: Size::new(block_width, block_height),
        line_height,
        line_advance,
    }
}

/// Greedy word wrap using measured widths. Explicit newlines start new paragraphs.
pub fn wrap_words(measurer: &dyn TextMeasurer, text: &str, width: f64, style: &TextStyle) -> Lines {
    let mut lines = Lines::new();
    for paragraph in text.trim().split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measurer.measure(&candidate, style).advance_width <= width + FIT_EPSILON {
                line = candidate;
            } else {
                lines.push(core::mem::replace(&mut line, word.to_string()));
            }
        }
        lines.push(line);
    }
    lines
}

/// Drops trailing characters from `line` until `line + ELLIPSIS` fits in `width`.
///
/// If even the ellipsis alone is too wide it is returned anyway.
pub fn ellipsize(measurer: &dyn TextMeasurer, line: &str, width: f64, style: &TextStyle) -> String {
    let mut base = String::from(line.trim_end());
    loop {
        let candidate = format!("{base}{ELLIPSIS}");
        let fits = measurer.measure(&candidate, style).advance_width <= width + FIT_EPSILON;
        if base.is_empty() || fits {
            return candidate;
        }
        base.pop();
        let trimmed = base.trim_end().len();
        base.truncate(trimmed);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use tabula_text::HeuristicTextMeasurer;

    use super::*;

    fn style() -> TextStyle {
        TextStyle::new(10.0)
    }

    #[test]
    fn short_text_fits_on_one_line_at_start_size() {
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "Swim",
            Size::new(200.0, 40.0),
            &style(),
            &FitOptions::new(14.0, 8.0),
        );
        assert_eq!(fitted.lines.len(), 1);
        assert_eq!(fitted.font_size, 14.0);
        assert!(fitted.fits);
        assert_eq!(fitted.attempts, 1);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // 5.5px per glyph at 10px: "Water safety" is 66px, "Water safety week" 93.5px.
        let lines = wrap_words(&HeuristicTextMeasurer, "Water safety week", 70.0, &style());
        assert_eq!(lines.as_slice(), ["Water safety", "week"]);
    }

    #[test]
    fn explicit_newlines_start_paragraphs() {
        let lines = wrap_words(&HeuristicTextMeasurer, "Total\nschools", 500.0, &style());
        assert_eq!(lines.as_slice(), ["Total", "schools"]);
    }

    #[test]
    fn long_word_is_not_broken() {
        let lines = wrap_words(
            &HeuristicTextMeasurer,
            "Supercalifragilistic",
            20.0,
            &style(),
        );
        assert_eq!(lines.as_slice(), ["Supercalifragilistic"]);
    }

    #[test]
    fn truncation_appends_ellipsis_within_width() {
        let options = FitOptions::new(10.0, 10.0)
            .with_max_lines(1)
            .with_autoshrink(false);
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "Learn to swim programme for every school",
            Size::new(60.0, 100.0),
            &style(),
            &options,
        );
        assert!(fitted.truncated);
        assert_eq!(fitted.lines.len(), 1);
        let last = &fitted.lines[0];
        assert!(last.ends_with(ELLIPSIS), "{last}");
        let w = HeuristicTextMeasurer.measure(last, &style()).advance_width;
        assert!(w <= 60.0 + 1e-9, "{w}");
    }

    #[test]
    fn ellipsis_alone_is_returned_for_tiny_widths() {
        let out = ellipsize(&HeuristicTextMeasurer, "Hazards", 1.0, &style());
        assert_eq!(out, "\u{2026}");
    }

    #[test]
    fn autoshrink_stops_at_the_floor() {
        let options = FitOptions::new(14.0, 8.0).with_max_lines(1);
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "An extremely long unbreakable-label-that-never-fits",
            Size::new(30.0, 5.0),
            &style(),
            &options,
        );
        assert_eq!(fitted.font_size, 8.0);
        assert!(!fitted.fits);
        assert_eq!(fitted.attempts, options.max_attempts());
        assert_eq!(options.max_attempts(), 7);
    }

    #[test]
    fn fractional_span_gets_one_extra_attempt() {
        let options = FitOptions::new(10.5, 8.0);
        assert_eq!(options.max_attempts(), 4);
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "overflowing-overflowing",
            Size::new(1.0, 1.0),
            &style(),
            &options,
        );
        assert_eq!(fitted.font_size, 8.0);
        assert!(fitted.attempts <= 4);
    }

    #[test]
    fn shrinking_until_fit() {
        // 20 glyphs: 110px at 10px, 88px at 8px.
        let options = FitOptions::new(10.0, 6.0).with_max_lines(1);
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "abcdefghijklmnopqrst",
            Size::new(90.0, 20.0),
            &style(),
            &options,
        );
        assert!(fitted.fits);
        assert_eq!(fitted.font_size, 8.0);
        assert_eq!(fitted.attempts, 3);
    }

    #[test]
    fn blank_text_is_empty_and_fits() {
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "   ",
            Size::new(10.0, 10.0),
            &style(),
            &FitOptions::default(),
        );
        assert!(fitted.is_empty());
        assert!(fitted.fits);
        assert_eq!(fitted.attempts, 0);
    }

    #[test]
    fn fitting_is_idempotent() {
        let options = FitOptions::new(14.0, 8.0).with_max_lines(2);
        let bounds = Size::new(120.0, 30.0);
        let text = "Basic awareness of potential water-related hazards";
        let a = fit_text(&HeuristicTextMeasurer, text, bounds, &style(), &options);
        let b = fit_text(&HeuristicTextMeasurer, text, bounds, &style(), &options);
        assert_eq!(a, b);
    }

    #[test]
    fn line_offsets_are_centered() {
        let options = FitOptions::new(10.0, 10.0).with_line_spacing(1.0);
        let fitted = fit_text(
            &HeuristicTextMeasurer,
            "one\ntwo\nthree",
            Size::new(100.0, 100.0),
            &style(),
            &options,
        );
        let offsets: Vec<f64> = fitted.line_offsets().collect();
        assert_eq!(offsets, [-10.0, 0.0, 10.0]);

        let marks = fitted.marks(
            Point::new(50.0, 50.0),
            TextAnchor::Middle,
            &style(),
            &Brush::default(),
            7,
            None,
        );
        assert_eq!(marks.len(), 3);
        let crate::mark::MarkPayload::Text(first) = &marks[0].payload else {
            panic!("expected text payload");
        };
        assert_eq!(first.text, "one");
        assert_eq!(first.pos, Point::new(50.0, 40.0));
        assert_eq!(marks[0].z_index, 7);
    }
}
