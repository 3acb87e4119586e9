use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::core::{PointBuffer, Series};
use crate::error::{ViewerError, ViewerResult};
use crate::io::Dataset;

/// Marker for a missing band value or error.
pub const NO_VALUE: &str = "n";
pub const FIELD_SEPARATOR: char = ',';
pub const COMMENT_PREFIX: char = '#';

/// Parses a dataset from text.
///
/// Layout: a header `source, band 1, ..., band n` followed by rows
/// `x, y1, err1, ..., yn, errn`. Blank lines and `#` comments are skipped;
/// a commented-out header is still honoured.
pub fn parse_str(input: &str) -> ViewerResult<Dataset> {
    parse_reader(input.as_bytes())
}

pub fn parse_file(path: impl AsRef<Path>) -> ViewerResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut dataset = parse_reader(BufReader::new(file))?;
    dataset.set_file_path(std::path::absolute(path)?);
    Ok(dataset)
}

pub fn parse_reader<R: BufRead>(reader: R) -> ViewerResult<Dataset> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        let Some((_, line)) = lines.next() else {
            return Err(ViewerError::InvalidData("no header found".to_owned()));
        };
        let line = line?;
        let line = line.trim();
        let line = line.strip_prefix(COMMENT_PREFIX).unwrap_or(line).trim();
        if !line.is_empty() {
            break Header::parse(line)?;
        }
    };

    let expected_fields = 1 + header.band_names.len() * 2;
    let mut x_values = PointBuffer::new(true);
    let mut bands: Vec<(PointBuffer, PointBuffer)> = header
        .band_names
        .iter()
        .map(|_| (PointBuffer::new(false), PointBuffer::new(true)))
        .collect();

    for (index, line) in lines {
        let line_number = index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        // Trailing separators add no fields.
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        if fields.len() != expected_fields {
            warn!(
                line = line_number,
                fields = fields.len(),
                expected = expected_fields,
                "skipping data line with wrong number of fields"
            );
            continue;
        }

        x_values.push(parse_value(fields[0], line_number, 1)?);
        for (band_index, (values, errors)) in bands.iter_mut().enumerate() {
            let column = 2 + band_index * 2;
            let value = fields[column - 1];
            let error = fields[column];
            if is_missing(value) || is_missing(error) {
                values.push_invalid();
                errors.push_invalid();
                continue;
            }
            values.push(parse_value(value, line_number, column)?);
            errors.push(parse_value(error, line_number, column + 1)?);
        }
    }

    if x_values.is_empty() {
        return Err(ViewerError::InvalidData("no data available".to_owned()));
    }

    x_values.finalize();
    let series = header
        .band_names
        .iter()
        .zip(bands)
        .map(|(name, (mut values, mut errors))| {
            values.finalize();
            errors.finalize();
            Series::new(name.clone(), x_values.clone(), (values, errors))
        })
        .collect::<ViewerResult<Vec<_>>>()?;

    debug!(
        source = %header.source_name,
        bands = series.len(),
        points = x_values.len(),
        "parsed dataset"
    );
    Dataset::new(header.source_name, series)
}

struct Header {
    source_name: String,
    band_names: Vec<String>,
}

impl Header {
    fn parse(line: &str) -> ViewerResult<Self> {
        let mut parts = line.split(FIELD_SEPARATOR).map(str::trim);
        let source_name = parts.next().unwrap_or_default().to_owned();
        let band_names: Vec<String> = parts.map(str::to_owned).collect();
        if band_names.is_empty() {
            return Err(ViewerError::InvalidData(
                "header format should be: source name, band 1, ..., band n".to_owned(),
            ));
        }
        Ok(Self {
            source_name,
            band_names,
        })
    }
}

fn is_missing(field: &str) -> bool {
    field.trim().eq_ignore_ascii_case(NO_VALUE)
}

fn parse_value(field: &str, line: usize, column: usize) -> ViewerResult<f32> {
    field.trim().parse::<f32>().map_err(|_| ViewerError::Parse {
        line,
        column,
        message: format!("not a valid value: '{}'", field.trim()),
    })
}
