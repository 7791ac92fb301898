// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page composition: banner, stacked table blocks, placeholders and the page footer.

use kurbo::{Point, Rect};
use tabula_layout::{
    Block, BlockPlacement, Canvas, ColumnSample, ColumnSpec, FitOptions, Mark, PageBox, Size,
    TableRenderer, TableSpec, TextAnchor, TextMeasurer, allocate_columns, fit_text, plan_blocks,
    z_order,
};

use crate::config::{Band, ReportConfig, Theme};
use crate::document::PageDocument;
use crate::error::ReportError;

/// A composed page, ready for serialization.
#[derive(Debug)]
pub(crate) struct ComposedPage {
    pub(crate) marks: Vec<Mark>,
    /// Cells or labels that still overflowed at the smallest font size.
    pub(crate) overflowing: usize,
}

/// Builds pages for one report.
///
/// Owns the table renderer; fitted cells are reused within a page and dropped at each page
/// break.
pub(crate) struct ReportBuilder<'a> {
    config: &'a ReportConfig,
    theme: Theme,
    measurer: &'a dyn TextMeasurer,
    renderer: TableRenderer,
}

impl std::fmt::Debug for ReportBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("measure_mode", &self.measurer.mode())
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl<'a> ReportBuilder<'a> {
    pub(crate) fn new(
        config: &'a ReportConfig,
        measurer: &'a dyn TextMeasurer,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            config,
            theme: config.theme()?,
            measurer,
            renderer: TableRenderer::new(),
        })
    }

    fn band_rect(&self, canvas: &Canvas<'_>, band: Band) -> Result<Rect, ReportError> {
        let page_box = PageBox::new(
            self.config.margin_x,
            band.bottom,
            1.0 - 2.0 * self.config.margin_x,
            (band.top - band.bottom).max(0.0),
        )?;
        Ok(canvas.to_rect(&page_box))
    }

    /// Composes page `number` (1-based) of `total`.
    pub(crate) fn build_page(
        &mut self,
        page: &PageDocument,
        number: usize,
        total: usize,
    ) -> Result<ComposedPage, ReportError> {
        let _span = tracing::info_span!("page", number, title = %page.title).entered();
        let blocks = page.blocks(number)?;
        self.renderer.clear_cache();
        let mut canvas = Canvas::new(self.config.page_size(), self.measurer);
        canvas.fill_background(self.theme.background.clone());
        let mut overflowing = 0;

        let title_rect = self.band_rect(&canvas, self.config.title_band)?;
        let fitted = self.theme.banner.draw(&mut canvas, title_rect, &page.title);
        overflowing += usize::from(!fitted.fits);

        if let Some(subtitle) = page.subtitle.as_deref() {
            let rect = self.band_rect(&canvas, self.config.subtitle_band)?;
            overflowing += usize::from(!self.centered_line(&mut canvas, rect, subtitle));
        }

        let spec = self.config.blocks;
        let demands: Vec<_> = blocks.iter().map(Block::demand).collect();
        let placements = plan_blocks(&demands, &spec);
        for (block, placement) in blocks.iter().zip(&placements) {
            if block.table.row_count() == 0 {
                self.placeholder(&mut canvas, block, placement)?;
                continue;
            }
            overflowing += self.draw_block(&mut canvas, block, placement)?;
        }

        self.page_footer(&mut canvas, number, total);
        tracing::debug!(blocks = blocks.len(), overflowing, "page composed");
        Ok(ComposedPage {
            marks: canvas.finish(),
            overflowing,
        })
    }

    /// Draws one table; returns the number of labels and cells that overflowed.
    fn draw_block(
        &mut self,
        canvas: &mut Canvas<'_>,
        block: &Block,
        placement: &BlockPlacement,
    ) -> Result<usize, ReportError> {
        let width = 1.0 - 2.0 * self.config.margin_x;
        let page_box = placement.page_box(self.config.margin_x, width)?;
        let page = canvas.size();
        let fracs = allocate_columns(
            canvas.measurer(),
            page_box.width * page.width,
            &ColumnSample::from_table(&block.table),
            &self.config.columns,
        );
        let mut spec = TableSpec::new(ColumnSpec::from_allocation(block.table.columns(), &fracs))
            .with_header_height_frac(block.header_height_frac)
            .with_footer_room_px(self.config.blocks.gap * page.height);
        spec.footer = block.footer.clone();
        tracing::trace!(
            block = %block.name,
            ?fracs,
            rows = block.table.row_count(),
            "drawing block"
        );
        Ok(self
            .renderer
            .draw(canvas, &page_box, &spec, &block.table, &self.theme.table))
    }

    /// The "no data" line for an empty block, placed in the room under its position.
    fn placeholder(
        &self,
        canvas: &mut Canvas<'_>,
        block: &Block,
        placement: &BlockPlacement,
    ) -> Result<(), ReportError> {
        tracing::debug!(block = %block.name, "no rows; drawing placeholder");
        let height = self.config.blocks.gap.max(0.0);
        let top = placement.top();
        let page_box = PageBox::new(
            self.config.margin_x,
            (top - height).max(0.0),
            1.0 - 2.0 * self.config.margin_x,
            height.min(top.max(0.0)),
        )?;
        let rect = canvas.to_rect(&page_box);
        let text = format!("{}: {}", block.name, self.config.no_data_text);
        let style = self.theme.footer.clone();
        let options = FitOptions::new(style.font_size, self.config.typography.min_font_size)
            .with_max_lines(1);
        let fitted = fit_text(
            canvas.measurer(),
            &text,
            Size::new(rect.width(), rect.height()),
            &style,
            &options,
        );
        canvas.extend(fitted.marks(
            Point::new(rect.x0, rect.center().y),
            TextAnchor::Start,
            &style,
            &self.theme.muted_text,
            z_order::ANNOTATIONS,
            None,
        ));
        Ok(())
    }

    /// Draws a single centered line fitted into `rect`; returns whether it fit.
    fn centered_line(&self, canvas: &mut Canvas<'_>, rect: Rect, text: &str) -> bool {
        let style = &self.theme.subtitle;
        let options = FitOptions::new(style.font_size, self.config.typography.min_font_size)
            .with_max_lines(1);
        let fitted = fit_text(
            canvas.measurer(),
            text,
            Size::new(rect.width(), rect.height()),
            style,
            &options,
        );
        canvas.extend(fitted.marks(
            rect.center(),
            TextAnchor::Middle,
            style,
            &self.theme.muted_text,
            z_order::ANNOTATIONS,
            None,
        ));
        fitted.fits
    }

    fn page_footer(&self, canvas: &mut Canvas<'_>, number: usize, total: usize) {
        let page = canvas.size();
        let style = &self.theme.footer;
        let y = page.height * (1.0 - 0.5 * self.config.blocks.y_bottom.clamp(0.0, 1.0));
        let x0 = page.width * self.config.margin_x;
        let x1 = page.width * (1.0 - self.config.margin_x);
        let line = FitOptions::new(style.font_size, style.font_size)
            .with_max_lines(1)
            .with_autoshrink(false);

        let label = format!("Page {number} of {total}");
        let bounds = Size::new(x1 - x0, f64::INFINITY);
        let fitted = fit_text(canvas.measurer(), &label, bounds, style, &line);
        canvas.extend(fitted.marks(
            Point::new(x1, y),
            TextAnchor::End,
            style,
            &self.theme.muted_text,
            z_order::FOOTER,
            None,
        ));

        if let Some(text) = self.config.page_footer.as_deref() {
            let room = (x1 - x0 - fitted.size.width - 12.0).max(0.0);
            let bounds = Size::new(room, f64::INFINITY);
            let fitted = fit_text(canvas.measurer(), text, bounds, style, &line);
            canvas.extend(fitted.marks(
                Point::new(x0, y),
                TextAnchor::Start,
                style,
                &self.theme.muted_text,
                z_order::FOOTER,
                None,
            ));
        }
    }
}
