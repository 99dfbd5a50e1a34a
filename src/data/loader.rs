use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::error::LoadError;
use super::model::{Dataset, LabelMapping};
use crate::selector::ColumnSelector;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do with a feature token that does not parse as a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Substitute `0.0` and keep going.
    #[default]
    Lenient,
    /// Abort the load with [`LoadError::MalformedValue`].
    Strict,
}

/// How a row's feature vector and target token are committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// The label is appended when the target token is non-empty; the feature
    /// row when it is non-empty. The two checks do not depend on each other,
    /// so irregular rows surface as a [`LoadError::RowCountMismatch`].
    #[default]
    Independent,
    /// A row is kept only if it has both a target token and features.
    SkipIncomplete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub numeric: NumericPolicy,
    pub rows: RowPolicy,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Open `path` and load it with [`load`].
pub fn load_file<S>(path: &Path, selector: &mut S, options: &LoadOptions) -> Result<Dataset, LoadError>
where
    S: ColumnSelector + ?Sized,
{
    let file = File::open(path)?;
    debug!("Reading {}", path.display());
    load(BufReader::new(file), selector, options)
}

/// Parse comma-delimited text into a [`Dataset`].
///
/// The first line is the header. After the header is normalized, `selector`
/// picks the target column; every other in-range column becomes a numeric
/// feature. Tokens are split on a bare `,` (no quoting) and every space
/// character is removed from them. Blank lines are ignored, as are tokens past
/// the header's column count. Bytes that are not valid UTF-8 are decoded
/// lossily instead of failing the load.
pub fn load<R, S>(mut source: R, selector: &mut S, options: &LoadOptions) -> Result<Dataset, LoadError>
where
    R: BufRead,
    S: ColumnSelector + ?Sized,
{
    let mut buf = Vec::new();

    let header_line = match read_line(&mut source, &mut buf)? {
        Some(line) => line,
        None => return Err(LoadError::EmptyInput),
    };
    let headers = parse_header(&header_line)?;

    debug!("Available columns ({} total):", headers.len());
    for (i, name) in headers.iter().enumerate() {
        debug!("  [{i}] {name}");
    }

    let target = selector.select(&headers)?;
    if target >= headers.len() {
        return Err(LoadError::InvalidTargetColumn {
            index: target,
            columns: headers.len(),
        });
    }

    let mut mapping = LabelMapping::default();
    let mut features: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();

    // Header is line 1.
    let mut line_no = 1;
    while let Some(line) = read_line(&mut source, &mut buf)? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let row = parse_row(&line, line_no, target, headers.len(), options.numeric)?;

        match options.rows {
            RowPolicy::Independent => {
                if !row.target.is_empty() {
                    labels.push(mapping.assign(&row.target));
                }
                if !row.features.is_empty() {
                    features.push(row.features);
                }
            }
            RowPolicy::SkipIncomplete => {
                if row.target.is_empty() || row.features.is_empty() {
                    debug!("Skipping incomplete row on line {line_no}");
                    continue;
                }
                labels.push(mapping.assign(&row.target));
                features.push(row.features);
            }
        }
    }

    if features.is_empty() || labels.is_empty() {
        return Err(LoadError::NoValidData);
    }
    if features.len() != labels.len() {
        return Err(LoadError::RowCountMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }

    let dataset = Dataset::loaded(headers, target, features, labels, mapping);
    info!(
        "Loaded {} samples with {} features ({} classes)",
        dataset.len(),
        dataset.num_features(),
        dataset.mapping().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Next line without its `\n` / `\r\n` terminator, or `None` at end of input.
fn read_line<R: BufRead>(source: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if source.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Comma-separated tokens; a single trailing comma does not open another field.
fn fields(line: &str) -> std::str::Split<'_, char> {
    line.strip_suffix(',').unwrap_or(line).split(',')
}

/// Remove every space character, wherever it appears in the token.
fn strip_spaces(token: &str) -> String {
    token.chars().filter(|&c| c != ' ').collect()
}

/// Split and normalize the header line.
///
/// Empty names become `(empty_col_<i>)`. Only a zero-length line has no columns.
pub fn parse_header(line: &str) -> Result<Vec<String>, LoadError> {
    if line.is_empty() {
        return Err(LoadError::NoColumns);
    }
    let headers = fields(line)
        .enumerate()
        .map(|(i, tok)| {
            let name = strip_spaces(tok);
            if name.is_empty() {
                format!("(empty_col_{i})")
            } else {
                name
            }
        })
        .collect();
    Ok(headers)
}

/// One data line, split into its feature vector and raw target token.
#[derive(Debug, Default, PartialEq)]
struct ParsedRow {
    features: Vec<f64>,
    target: String,
}

fn parse_row(
    line: &str,
    line_no: usize,
    target: usize,
    num_columns: usize,
    policy: NumericPolicy,
) -> Result<ParsedRow, LoadError> {
    let mut row = ParsedRow::default();

    for (col, tok) in fields(line).enumerate() {
        let tok = strip_spaces(tok);
        if col == target {
            row.target = tok;
        } else if col < num_columns {
            row.features.push(parse_value(&tok, line_no, col, policy)?);
        }
    }
    Ok(row)
}

fn parse_value(token: &str, line: usize, column: usize, policy: NumericPolicy) -> Result<f64, LoadError> {
    match token.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => match policy {
            NumericPolicy::Lenient => {
                trace!("Line {line}, column {column}: '{token}' is not a number, using 0.0");
                Ok(0.0)
            }
            NumericPolicy::Strict => Err(LoadError::MalformedValue {
                line,
                column,
                token: token.to_string(),
            }),
        },
    }
}
