// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading font assets from a directory.

use alloc::vec::Vec;
use std::path::{Path, PathBuf};

use crate::ParleyTextMeasurer;

/// Errors returned by [`ParleyTextMeasurer::register_font_dir`].
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    /// The directory could not be listed.
    #[error("failed to read font directory {path}")]
    ReadDir {
        /// The directory that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl ParleyTextMeasurer {
    /// Registers every font file found directly inside `dir`.
    ///
    /// Unreadable individual files are skipped with a warning. Returns the
    /// number of font families registered. Intended to run once at startup.
    pub fn register_font_dir(&self, dir: &Path) -> Result<usize, FontLoadError> {
        let entries = std::fs::read_dir(dir).map_err(|source| FontLoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_font_file(p))
            .collect();
        paths.sort();

        let mut families = 0;
        for path in paths {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let added = self.register_font_data(bytes);
                    tracing::debug!(path = %path.display(), families = added, "registered font");
                    families += added;
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable font"
                    );
                }
            }
        }
        Ok(families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_reported() {
        let m = ParleyTextMeasurer::new();
        let err = m
            .register_font_dir(Path::new("/definitely/not/a/font/dir"))
            .expect_err("missing dir must error");
        assert!(matches!(err, FontLoadError::ReadDir { .. }));
    }

    #[test]
    fn font_extensions_are_case_insensitive() {
        assert!(is_font_file(Path::new("fonts/Inter.TTF")));
        assert!(is_font_file(Path::new("fonts/Inter.otf")));
        assert!(!is_font_file(Path::new("fonts/readme.txt")));
    }
}
