use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::core::Series;
use crate::error::{ViewerError, ViewerResult};
use crate::io::Dataset;
use crate::io::parser::NO_VALUE;

const SEPARATOR: &str = ", ";
const EOF_MARKER: &str = "# Eof";

/// Writes bands in the format [`crate::io::parse_reader`] reads back.
///
/// Rows where every band is invalid are dropped. X comes from the first band.
pub fn write_bands<'a, W: Write>(
    writer: &mut W,
    source_name: &str,
    bands: impl IntoIterator<Item = &'a Series>,
) -> ViewerResult<usize> {
    let bands: Vec<&Series> = bands.into_iter().collect();
    let Some(first) = bands.first() else {
        return Err(ViewerError::InvalidData("nothing to write".to_owned()));
    };

    let header = std::iter::once(source_name)
        .chain(bands.iter().map(|band| band.id()))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    writeln!(writer, "{header}")?;

    let mut rows = 0;
    let mut fields = Vec::with_capacity(1 + bands.len() * 2);
    for index in 0..first.len() {
        fields.clear();
        fields.push(first.x().get(index).to_string());
        let mut valid_bands = 0;
        for band in &bands {
            if band.is_valid_at(index) {
                fields.push(band.y().get(index).to_string());
                fields.push(band.y_error().get(index).to_string());
                valid_bands += 1;
            } else {
                fields.push(NO_VALUE.to_owned());
                fields.push(NO_VALUE.to_owned());
            }
        }
        if valid_bands > 0 {
            writeln!(writer, "{}", fields.join(SEPARATOR))?;
            rows += 1;
        }
    }
    writeln!(writer, "{EOF_MARKER}")?;
    Ok(rows)
}

pub fn write_dataset<W: Write>(writer: &mut W, dataset: &Dataset) -> ViewerResult<usize> {
    write_bands(writer, dataset.source_name(), dataset.bands())
}

/// Saves a dataset to `path`, replacing any existing file.
pub fn persist(path: impl AsRef<Path>, dataset: &Dataset) -> ViewerResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let rows = write_dataset(&mut writer, dataset)?;
    writer.flush()?;
    debug!(path = %path.display(), rows, "dataset persisted");
    Ok(())
}
