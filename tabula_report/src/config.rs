// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Report configuration, read from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the keys it changes. Colors are
//! CSS color strings.

use std::path::{Path, PathBuf};

use peniko::Brush;
use peniko::color::{AlphaColor, Srgb, parse_color};
use serde::{Deserialize, Serialize};
use tabula_layout::{
    AllocationConstraints, BannerSpec, BlockLayoutSpec, FitOptions, FontFamily, FontWeight,
    PageSize, PolygonTextStyle, StrokeStyle, TableStyle, TextStyle,
};

use crate::error::ReportError;

/// Page size in pixels (CSS pixels at 96 dpi; the default is US Letter).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PageConfig {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 1056.0,
        }
    }
}

/// A horizontal band in normalized page units (`0` is the bottom edge).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Band {
    pub(crate) top: f64,
    pub(crate) bottom: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ThemeConfig {
    pub(crate) background: String,
    pub(crate) banner_fill: String,
    pub(crate) banner_text: String,
    pub(crate) header_fill: String,
    pub(crate) header_text: String,
    pub(crate) stripe_fill: String,
    pub(crate) body_text: String,
    pub(crate) grid: String,
    pub(crate) muted_text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "white".into(),
            banner_fill: "#1f4e79".into(),
            banner_text: "white".into(),
            header_fill: "#2e6da4".into(),
            header_text: "white".into(),
            stripe_fill: "#eef3f8".into(),
            body_text: "#222222".into(),
            grid: "#c8ced6".into(),
            muted_text: "dimgray".into(),
        }
    }
}

/// Font sizes and line limits for fitted text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct TypeConfig {
    pub(crate) title_font_size: f64,
    pub(crate) subtitle_font_size: f64,
    pub(crate) header_font_size: f64,
    pub(crate) body_font_size: f64,
    pub(crate) footer_font_size: f64,
    pub(crate) min_font_size: f64,
    pub(crate) header_max_lines: usize,
    pub(crate) cell_max_lines: usize,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            title_font_size: 22.0,
            subtitle_font_size: 12.0,
            header_font_size: 11.0,
            body_font_size: 10.0,
            footer_font_size: 9.0,
            min_font_size: 6.0,
            header_max_lines: 3,
            cell_max_lines: 2,
        }
    }
}

/// Everything the builder needs besides the document itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ReportConfig {
    pub(crate) page: PageConfig,
    /// Left and right margin, normalized.
    pub(crate) margin_x: f64,
    pub(crate) title_band: Band,
    pub(crate) subtitle_band: Band,
    pub(crate) blocks: BlockLayoutSpec,
    pub(crate) columns: AllocationConstraints,
    pub(crate) font_family: String,
    pub(crate) font_dir: Option<PathBuf>,
    pub(crate) theme: ThemeConfig,
    pub(crate) typography: TypeConfig,
    /// Printed at the bottom of every page, before the page number.
    pub(crate) page_footer: Option<String>,
    /// Shown in place of a table that has no rows.
    pub(crate) no_data_text: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            margin_x: 0.05,
            title_band: Band {
                top: 0.97,
                bottom: 0.915,
            },
            subtitle_band: Band {
                top: 0.91,
                bottom: 0.885,
            },
            blocks: BlockLayoutSpec {
                y_top: 0.87,
                y_bottom: 0.06,
                ..BlockLayoutSpec::default()
            },
            columns: AllocationConstraints::default(),
            font_family: "sans-serif".into(),
            font_dir: None,
            theme: ThemeConfig::default(),
            typography: TypeConfig::default(),
            page_footer: None,
            no_data_text: "No data available".into(),
        }
    }
}

/// Reads `path` if given; otherwise returns the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ReportConfig, ReportError> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ReportConfig =
        serde_json::from_str(&contents).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), "loaded report config");
    Ok(config)
}

fn css(field: &'static str, value: &str) -> Result<AlphaColor<Srgb>, ReportError> {
    parse_color(value)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ReportError::Color {
            field,
            value: value.to_string(),
        })
}

/// Resolved paints, checked once so drawing never deals with bad color strings.
#[derive(Clone, Debug)]
pub(crate) struct Theme {
    pub(crate) background: Brush,
    pub(crate) muted_text: Brush,
    pub(crate) table: TableStyle,
    pub(crate) banner: BannerSpec,
    pub(crate) subtitle: TextStyle,
    pub(crate) footer: TextStyle,
}

impl ReportConfig {
    pub(crate) fn page_size(&self) -> PageSize {
        PageSize::new(self.page.width, self.page.height)
    }

    pub(crate) fn family(&self) -> FontFamily {
        FontFamily::parse(&self.font_family)
    }

    /// Resolves colors and fonts.
    pub(crate) fn theme(&self) -> Result<Theme, ReportError> {
        let t = &self.theme;
        let ty = &self.typography;
        let family = self.family();
        let grid = css("theme.grid", &t.grid)?;
        let header_fill = css("theme.header_fill", &t.header_fill)?;
        let muted = css("theme.muted_text", &t.muted_text)?;

        let table = TableStyle {
            font_family: family.clone(),
            frame_stroke: StrokeStyle::solid(grid, 1.0),
            header_fill: header_fill.into(),
            header_text: css("theme.header_text", &t.header_text)?.into(),
            header_fit: FitOptions::new(ty.header_font_size, ty.min_font_size)
                .with_max_lines(ty.header_max_lines),
            header_separator: StrokeStyle::solid(header_fill, 1.5),
            stripe_fill: css("theme.stripe_fill", &t.stripe_fill)?.into(),
            body_text: css("theme.body_text", &t.body_text)?.into(),
            body_fit: FitOptions::new(ty.body_font_size, ty.min_font_size)
                .with_max_lines(ty.cell_max_lines),
            grid: Some(StrokeStyle::solid(grid, 0.5)),
            padding_px: self.columns.padding_px,
            footer_text: muted.into(),
            footer_font_size: ty.footer_font_size,
            ..TableStyle::default()
        };

        let banner = BannerSpec::default()
            .with_fill(css("theme.banner_fill", &t.banner_fill)?)
            .with_text(PolygonTextStyle {
                text: TextStyle::default()
                    .with_family(family.clone())
                    .with_weight(FontWeight::BOLD),
                fit: FitOptions::new(ty.title_font_size, ty.min_font_size.max(10.0))
                    .with_max_lines(2),
                fill: css("theme.banner_text", &t.banner_text)?.into(),
                ..PolygonTextStyle::default()
            });

        Ok(Theme {
            background: css("theme.background", &t.background)?.into(),
            muted_text: muted.into(),
            table,
            banner,
            subtitle: TextStyle::new(ty.subtitle_font_size).with_family(family.clone()),
            footer: TextStyle::new(ty.footer_font_size).with_family(family),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config: ReportConfig = serde_json::from_str(
            r#"{ "page": { "width": 1000 }, "theme": { "stripe_fill": "rgb(240, 240, 240)" } }"#,
        )
        .expect("valid config");
        assert_eq!(config.page.width, 1000.0);
        assert_eq!(config.page.height, 1056.0);
        assert_eq!(config.theme.header_fill, "#2e6da4");
        assert!(config.theme().is_ok());
    }

    #[test]
    fn nested_layout_knobs_deserialize() {
        let config: ReportConfig = serde_json::from_str(
            r#"{ "blocks": { "gap": 0.03 }, "columns": { "min_text_col_px": 80 } }"#,
        )
        .expect("valid config");
        assert_eq!(config.blocks.gap, 0.03);
        assert_eq!(config.blocks.target_row_h, BlockLayoutSpec::default().target_row_h);
        assert_eq!(config.columns.min_text_col_px, 80.0);
    }

    #[test]
    fn bad_colors_name_the_field() {
        let mut config = ReportConfig::default();
        config.theme.grid = "not-a-color".into();
        let err = config.theme().expect_err("bad color");
        assert!(matches!(err, ReportError::Color { field: "theme.grid", .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_config(Some(Path::new("/no/such/tabula.json"))).expect_err("missing");
        assert!(matches!(err, ReportError::Read { .. }));
        assert!(load_config(None).is_ok());
    }
}
