// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement adapter.
//!
//! This crate implements [`tabula_text::TextMeasurer`] using Parley, giving the
//! fitter and column allocator shaping-aware widths (the exact measurement
//! path). When Parley cannot produce a line for non-empty text, typically
//! because no usable font resolved, measurement degrades to the heuristic.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use parley::fontique::Blob;
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight};
use tabula_text::{FontFamily, FontStyle, MeasureMode, TextMeasurer, TextMetrics, TextStyle};

#[cfg(feature = "std")]
mod font_dir;

#[cfg(feature = "std")]
pub use font_dir::FontLoadError;

/// A [`TextMeasurer`] backed by Parley.
///
/// Each measurer owns its own font and layout contexts. Create one per report
/// (or per worker) rather than sharing it across threads.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
    quantize: bool,
    ready: Cell<bool>,
    degraded: Cell<bool>,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .field("ready", &self.ready.get())
            .field("degraded", &self.degraded.get())
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a new Parley-backed text measurer using the system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
            quantize: true,
            ready: Cell::new(false),
            degraded: Cell::new(false),
        }
    }

    /// Sets the display scale passed to Parley.
    ///
    /// This is typically a device pixel ratio. Measurements returned by this
    /// measurer are scaled back into logical coordinates (divide by scale).
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley should quantize layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    /// Registers the fonts contained in a font file (TTF, OTF or collection).
    ///
    /// Returns the number of font families the data contributed. Registration
    /// is additive; registering the same bytes twice only duplicates entries in
    /// Parley's collection, it does not change measurement results.
    pub fn register_font_data(&self, data: Vec<u8>) -> usize {
        let mut font_cx = self.font_cx.borrow_mut();
        let families = font_cx.collection.register_fonts(Blob::from(data), None);
        families.len()
    }

    /// Returns `true` once a measurement had to fall back to the heuristic.
    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    fn parley_font_stack(family: &FontFamily) -> FontStack<'_> {
        let family = match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        };
        FontStack::from(family)
    }

    fn parley_font_style(style: FontStyle) -> ParleyFontStyle {
        match style {
            FontStyle::Normal => ParleyFontStyle::Normal,
            FontStyle::Italic => ParleyFontStyle::Italic,
            FontStyle::Oblique => ParleyFontStyle::Oblique(None),
        }
    }

    fn font_size_f32(font_size: f64) -> f32 {
        if !font_size.is_finite() {
            return 0.0;
        }
        let font_size = font_size.max(0.0);
        if font_size >= f64::from(f32::MAX) {
            f32::MAX
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Value is clamped to f32::MAX above"
            )]
            {
                font_size as f32
            }
        }
    }

    fn shape_line(&self, text: &str, style: &TextStyle) -> Option<TextMetrics> {
        let scale = self.display_scale.max(1.0e-6);

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, scale, self.quantize);
        builder.push_default(StyleProperty::FontSize(Self::font_size_f32(
            style.font_size,
        )));
        builder.push_default(StyleProperty::FontStack(Self::parley_font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(Self::parley_font_style(
            style.font_style,
        )));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let line = layout.lines().next()?;
        let m = line.metrics();
        if m.advance <= 0.0 {
            return None;
        }
        let scale = f64::from(scale);
        Some(TextMetrics {
            advance_width: f64::from(m.advance) / scale,
            ascent: f64::from(m.ascent) / scale,
            descent: f64::from(m.descent) / scale,
            leading: f64::from(m.leading) / scale,
        })
    }

    fn note_degraded(&self, text: &str, style: &TextStyle) {
        if !self.degraded.replace(true) {
            tracing::warn!(
                family = style.font_family.as_css_family(),
                font_size = style.font_size,
                sample = text,
                "no usable font for shaping; falling back to heuristic text metrics"
            );
        }
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics> {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return Some(TextMetrics::ZERO);
        }
        self.ensure_ready();
        let metrics = self.shape_line(text, style);
        if metrics.is_none() {
            self.note_degraded(text, style);
        }
        metrics
    }

    fn ensure_ready(&self) {
        if self.ready.replace(true) {
            return;
        }
        // The first layout populates Parley's font collection and caches.
        let warm = self.shape_line("Mg", &TextStyle::default());
        tracing::debug!(
            exact = warm.is_some(),
            "parley text measurer initialized"
        );
    }

    fn mode(&self) -> MeasureMode {
        if self.degraded.get() {
            MeasureMode::Heuristic
        } else {
            MeasureMode::Exact
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn parley_measurer_is_nonzero_for_nonempty_text() {
        let m = ParleyTextMeasurer::new();
        let metrics = m.measure("Hello", &TextStyle::new(12.0));
        assert!(metrics.advance_width > 0.0);
        assert!(metrics.line_height() > 0.0);
    }

    #[test]
    fn empty_text_is_zero_without_degrading() {
        let m = ParleyTextMeasurer::new();
        let metrics = m.measure("", &TextStyle::new(12.0));
        assert_eq!(metrics, TextMetrics::ZERO);
        assert!(!m.is_degraded());
    }

    #[test]
    fn ensure_ready_is_idempotent() {
        let m = ParleyTextMeasurer::new();
        m.ensure_ready();
        m.ensure_ready();
        let a = m.measure("Swim", &TextStyle::new(14.0));
        let b = m.measure("Swim", &TextStyle::new(14.0));
        assert_eq!(a, b);
    }

    #[test]
    fn wider_text_measures_wider() {
        let m = ParleyTextMeasurer::new();
        let style = TextStyle::new(12.0);
        let short = m.measure("pool", &style).advance_width;
        let long = m.measure("pool safety lessons", &style).advance_width;
        assert!(long > short, "{long} <= {short}");
    }
}
