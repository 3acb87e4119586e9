use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::core::Series;
use crate::error::{ViewerError, ViewerResult};

/// All bands loaded from one source, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source_name: String,
    bands: IndexMap<String, Series>,
    file_path: Option<PathBuf>,
}

impl Dataset {
    /// Groups bands under a source name; band ids must be unique and the
    /// bands must share the same length.
    pub fn new(
        source_name: impl Into<String>,
        series: impl IntoIterator<Item = Series>,
    ) -> ViewerResult<Self> {
        let mut bands: IndexMap<String, Series> = IndexMap::new();
        for band in series {
            if let Some(first) = bands.values().next() {
                if first.len() != band.len() {
                    return Err(ViewerError::InvalidData(format!(
                        "band '{}' has {} points, expected {}",
                        band.id(),
                        band.len(),
                        first.len()
                    )));
                }
            }
            let id = band.id().to_owned();
            if bands.insert(id.clone(), band).is_some() {
                return Err(ViewerError::InvalidData(format!(
                    "duplicate band name '{id}'"
                )));
            }
        }
        if bands.is_empty() {
            return Err(ViewerError::InvalidData(
                "a dataset needs at least one band".to_owned(),
            ));
        }

        Ok(Self {
            source_name: source_name.into(),
            bands,
            file_path: None,
        })
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    #[must_use]
    pub fn band(&self, name: &str) -> Option<&Series> {
        self.bands.get(name)
    }

    pub fn band_names(&self) -> impl Iterator<Item = &str> {
        self.bands.keys().map(String::as_str)
    }

    pub fn bands(&self) -> impl Iterator<Item = &Series> {
        self.bands.values()
    }

    #[must_use]
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Number of rows, shared by every band.
    #[must_use]
    pub fn points_len(&self) -> usize {
        self.bands.values().next().map_or(0, Series::len)
    }

    #[must_use]
    pub fn into_bands(self) -> IndexMap<String, Series> {
        self.bands
    }
}
