// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the report builder.

use std::path::PathBuf;

use tabula_layout::{DataTableError, GeometryError};

use crate::raster::RasterError;

/// Anything that stops a report from being written.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ReportError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config field `{field}`: `{value}` is not a CSS color")]
    Color { field: &'static str, value: String },
    #[error("page {page}, section `{section}`")]
    Data {
        page: usize,
        section: String,
        #[source]
        source: DataTableError,
    },
    #[error("page {page}, section `{section}`")]
    Section {
        page: usize,
        section: String,
        #[source]
        source: GeometryError,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[cfg(feature = "parley")]
    #[error(transparent)]
    Fonts(#[from] tabula_text_parley::FontLoadError),
}
