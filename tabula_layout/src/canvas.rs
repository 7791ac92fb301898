// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-page drawing target.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use tabula_text::{MeasureMode, TextMeasurer};

use crate::geometry::{PageBox, PageSize};
use crate::mark::Mark;
use crate::z_order;

/// A page being composed: its pixel size, the measurer used for every text run, and the marks
/// emitted so far.
///
/// Construction calls [`TextMeasurer::ensure_ready`], so measurements taken through
/// [`Canvas::measurer`] are always valid. One canvas belongs to one page; independent reports
/// each own their own canvas.
pub struct Canvas<'m> {
    size: PageSize,
    measurer: &'m dyn TextMeasurer,
    marks: Vec<Mark>,
}

impl core::fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.size)
            .field("measure_mode", &self.measurer.mode())
            .field("marks", &self.marks.len())
            .finish_non_exhaustive()
    }
}

impl<'m> Canvas<'m> {
    /// Creates an empty page of the given pixel size.
    pub fn new(size: PageSize, measurer: &'m dyn TextMeasurer) -> Self {
        measurer.ensure_ready();
        Self {
            size,
            measurer,
            marks: Vec::new(),
        }
    }

    /// The page size in pixels.
    pub fn size(&self) -> PageSize {
        self.size
    }

    /// The measurer backing this page.
    pub fn measurer(&self) -> &'m dyn TextMeasurer {
        self.measurer
    }

    /// Which measurement path this page is using.
    pub fn measure_mode(&self) -> MeasureMode {
        self.measurer.mode()
    }

    /// Converts a normalized box to page pixels.
    pub fn to_rect(&self, page_box: &PageBox) -> Rect {
        page_box.to_rect(self.size)
    }

    /// The whole page as a pixel rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    /// Paints the page background.
    pub fn fill_background(&mut self, fill: impl Into<Brush>) {
        let bounds = self.bounds();
        self.push(Mark::fill_rect(z_order::PAGE_BACKGROUND, bounds, fill));
    }

    /// Appends a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Appends several marks.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Marks emitted so far, in insertion order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Finishes the page, returning marks in paint order.
    ///
    /// The sort is stable, so marks sharing a `z_index` keep their insertion order.
    pub fn finish(self) -> Vec<Mark> {
        let mut marks = self.marks;
        marks.sort_by_key(|m| m.z_index);
        marks
    }
}
