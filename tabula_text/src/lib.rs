// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for table and label layout.
//!
//! Tabula fits text into fixed page regions: wrap points, shrink decisions and
//! column widths all depend on how wide a run of text renders. Layout code
//! depends only on the small [`TextMeasurer`] interface defined here, so the
//! same layout can be driven by a shaping engine (exact mode) or by the
//! [`HeuristicTextMeasurer`] (degraded mode).
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// Whether a measurer reflects real shaping or an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// Measurements come from the same shaping primitives used for final drawing.
    Exact,
    /// Measurements are an average-glyph-width estimate.
    Heuristic,
}

/// A minimal text measurement interface used by the fitter and table layout.
///
/// Implementations can be:
/// - heuristic (fast, deterministic, inaccurate), or
/// - backed by a shaping engine (e.g. Parley).
///
/// Measurement never fails from the caller's point of view: when
/// [`TextMeasurer::try_measure`] cannot produce a result, [`TextMeasurer::measure`]
/// falls back to [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    /// Measure a single line of text, or `None` if this backend cannot.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics>;

    /// Measure a single line of text, degrading to the heuristic on failure.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.try_measure(text, style)
            .unwrap_or_else(|| HeuristicTextMeasurer.metrics(text, style))
    }

    /// Performs any one-time setup needed before measurements are valid.
    ///
    /// Callers that own a drawing surface invoke this once when the surface is
    /// created. It must be idempotent.
    fn ensure_ready(&self) {}

    /// Reports which measurement path this backend uses.
    fn mode(&self) -> MeasureMode {
        MeasureMode::Heuristic
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in page pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns a copy of this style at a different font size.
    #[must_use]
    pub fn with_font_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }

    /// Parses a CSS-style family name, mapping generic keywords to their variants.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "serif" => Self::Serif,
            "" | "sans-serif" => Self::SansSerif,
            "monospace" => Self::Monospace,
            other => Self::Named(Arc::from(other)),
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty run.
    pub const ZERO: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns `(width, height)` of the line box.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.advance_width, self.line_height())
    }
}

/// A heuristic text measurer used as the degraded measurement path.
///
/// It assumes an average glyph width of 0.55em, an ascent of 0.8em and a
/// descent of 0.2em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl HeuristicTextMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub const AVG_CHAR_WIDTH_EM: f64 = 0.55;

    /// Estimates metrics without going through the trait.
    #[must_use]
    pub fn metrics(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::ZERO;
        }
        let font_size = style.font_size.max(0.0);
        let mut advance_width =
            Self::AVG_CHAR_WIDTH_EM * font_size * text.chars().count() as f64;
        if style.font_weight >= FontWeight::BOLD {
            advance_width *= 1.05;
        }
        TextMetrics {
            advance_width,
            ascent: 0.8 * font_size,
            descent: 0.2 * font_size,
            leading: 0.0,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics> {
        Some(self.metrics(text, style))
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics> {
        (**self).try_measure(text, style)
    }

    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }

    fn ensure_ready(&self) {
        (**self).ensure_ready();
    }

    fn mode(&self) -> MeasureMode {
        (**self).mode()
    }
}
