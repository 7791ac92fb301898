// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PNG and PDF snapshots of page SVGs.

use std::path::PathBuf;

use resvg::{tiny_skia, usvg};

#[derive(Debug, thiserror::Error)]
pub(crate) enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

#[derive(Clone, Debug)]
pub(crate) struct RasterOptions {
    /// Device pixels per page pixel.
    pub(crate) scale: f32,
    /// Family used when a text run names none that is installed.
    pub(crate) font_family: String,
    /// Extra fonts, loaded on top of the system fonts.
    pub(crate) font_dir: Option<PathBuf>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_family: "sans-serif".into(),
            font_dir: None,
        }
    }
}

/// Converts page SVGs, with fonts loaded once up front.
pub(crate) struct Rasterizer {
    scale: f32,
    png: usvg::Options<'static>,
    pdf: svg2pdf::usvg::Options<'static>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("scale", &self.scale)
            .field("fonts", &self.png.fontdb.len())
            .finish_non_exhaustive()
    }
}

impl Rasterizer {
    pub(crate) fn new(options: &RasterOptions) -> Self {
        let mut png = usvg::Options::default();
        let fontdb = png.fontdb_mut();
        fontdb.load_system_fonts();
        if let Some(dir) = &options.font_dir {
            fontdb.load_fonts_dir(dir);
        }
        png.font_family = options.font_family.clone();

        let mut pdf = svg2pdf::usvg::Options::default();
        let fontdb = pdf.fontdb_mut();
        fontdb.load_system_fonts();
        if let Some(dir) = &options.font_dir {
            fontdb.load_fonts_dir(dir);
        }
        pdf.font_family = options.font_family.clone();

        let scale = if options.scale.is_finite() && options.scale > 0.0 {
            options.scale
        } else {
            1.0
        };
        tracing::debug!(fonts = png.fontdb.len(), scale, "rasterizer ready");
        Self { scale, png, pdf }
    }

    pub(crate) fn png(&self, svg: &str) -> Result<Vec<u8>, RasterError> {
        let tree = usvg::Tree::from_str(svg, &self.png).map_err(|_| RasterError::SvgParse)?;
        let size = tree.size();
        let width = pixel_dim(size.width() * self.scale);
        let height = pixel_dim(size.height() * self.scale);
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RasterError::PixmapAlloc { width, height })?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(self.scale, self.scale),
            &mut pixmap.as_mut(),
        );
        pixmap.encode_png().map_err(|_| RasterError::PngEncode)
    }

    pub(crate) fn pdf(&self, svg: &str) -> Result<Vec<u8>, RasterError> {
        let tree =
            svg2pdf::usvg::Tree::from_str(svg, &self.pdf).map_err(|_| RasterError::SvgParse)?;
        svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|_| RasterError::PdfConvert)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "page sizes are small, positive and finite"
)]
fn pixel_dim(v: f32) -> u32 {
    v.ceil().max(1.0) as u32
}
