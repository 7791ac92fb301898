// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `tabula`: renders a JSON report document into paged SVG, PNG or PDF files.
//!
//! Without `--input` the built-in sample document is rendered. Logging goes through
//! `tracing`; set `RUST_LOG` (default `info`) to change the level.

mod builder;
mod config;
mod document;
mod error;
mod raster;
mod svg;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tabula_layout::{HeuristicTextMeasurer, TextMeasurer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::builder::ReportBuilder;
use crate::config::load_config;
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::raster::{RasterOptions, Rasterizer};

#[derive(Parser, Debug)]
#[command(name = "tabula", version, about = "Render tabular reports to SVG, PNG or PDF")]
struct Args {
    /// Report document (JSON). Renders the built-in sample when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for the rendered pages.
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,

    /// Config JSON file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format. SVG is always written; PNG and PDF are added on request.
    #[arg(short, long, value_enum, default_value = "svg")]
    format: OutputFormat,

    /// Text measurement backend.
    #[arg(long, value_enum, default_value = "parley")]
    measurer: MeasurerKind,

    /// Directory of extra fonts (overrides the config file).
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Raster scale for PNG output.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MeasurerKind {
    /// Width estimate from character counts; deterministic everywhere.
    Heuristic,
    /// Shaped measurement with system and configured fonts.
    Parley,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(feature = "parley")]
fn make_measurer(
    kind: MeasurerKind,
    font_dir: Option<&Path>,
) -> Result<Box<dyn TextMeasurer>, ReportError> {
    match kind {
        MeasurerKind::Heuristic => Ok(Box::new(HeuristicTextMeasurer)),
        MeasurerKind::Parley => {
            let measurer = tabula_text_parley::ParleyTextMeasurer::new();
            if let Some(dir) = font_dir {
                let count = measurer.register_font_dir(dir)?;
                tracing::info!(dir = %dir.display(), count, "registered fonts");
            }
            Ok(Box::new(measurer))
        }
    }
}

#[cfg(not(feature = "parley"))]
fn make_measurer(
    kind: MeasurerKind,
    _font_dir: Option<&Path>,
) -> Result<Box<dyn TextMeasurer>, ReportError> {
    if kind == MeasurerKind::Parley {
        tracing::warn!("built without the `parley` feature; using the heuristic measurer");
    }
    Ok(Box::new(HeuristicTextMeasurer))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    std::fs::write(path, bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.font_dir.is_some() {
        config.font_dir = args.font_dir.clone();
    }
    let document = match &args.input {
        Some(path) => ReportDocument::load(path)?,
        None => {
            tracing::info!("no input given; rendering the built-in sample");
            ReportDocument::sample()?
        }
    };

    let measurer = make_measurer(args.measurer, config.font_dir.as_deref())?;
    let mut builder = ReportBuilder::new(&config, measurer.as_ref())?;
    let rasterizer = (args.format != OutputFormat::Svg).then(|| {
        Rasterizer::new(&RasterOptions {
            scale: args.scale,
            font_family: config.family().as_css_family().to_string(),
            font_dir: config.font_dir.clone(),
        })
    });

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let total = document.pages.len();
    for (i, page) in document.pages.iter().enumerate() {
        let number = i + 1;
        let composed = builder.build_page(page, number, total)?;
        if composed.overflowing > 0 {
            tracing::warn!(
                page = number,
                count = composed.overflowing,
                "text overflowed at the minimum size"
            );
        }
        let svg = svg::page_to_svg(config.page_size(), &composed.marks);
        let stem = args.out_dir.join(format!("page-{number:02}"));
        write_file(&stem.with_extension("svg"), svg.as_bytes())?;

        if let Some(rasterizer) = &rasterizer {
            let (ext, bytes) = match args.format {
                OutputFormat::Png => ("png", rasterizer.png(&svg)?),
                OutputFormat::Pdf => ("pdf", rasterizer.pdf(&svg)?),
                OutputFormat::Svg => continue,
            };
            write_file(&stem.with_extension(ext), &bytes)?;
        }
        tracing::info!(
            page = number,
            marks = composed.marks.len(),
            mode = ?measurer.mode(),
            "wrote {}",
            stem.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);
    run(args)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "tabula",
            "--format",
            "pdf",
            "--measurer",
            "heuristic",
            "--out-dir",
            "/tmp/tabula",
        ])
        .expect("valid flags");
        assert_eq!(args.format, OutputFormat::Pdf);
        assert_eq!(args.measurer, MeasurerKind::Heuristic);
        assert!(args.input.is_none());
    }

    #[test]
    fn sample_renders_to_svg_files() {
        let dir = std::env::temp_dir().join(format!("tabula-test-{}", std::process::id()));
        let args = Args::try_parse_from([
            "tabula",
            "--measurer",
            "heuristic",
            "--out-dir",
            dir.to_str().expect("utf-8 temp dir"),
        ])
        .expect("valid flags");
        run(args).expect("sample renders");
        let svg = std::fs::read_to_string(dir.join("page-01.svg")).expect("page written");
        assert!(svg.contains("Page 1 of 2"));
        assert!(dir.join("page-02.svg").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
