//! CSV loader with delimiter sniffing and permissive decoding.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use crate::error::{Error, Result};
use crate::record::{RawRecord, SOURCE_COLUMNS};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Reads a listings extract into raw records.
///
/// The extract may carry more columns than the pipeline keeps; the loader
/// selects the thirteen contract columns by header name and ignores the
/// rest. A *missing* contract column is the one fatal boundary condition,
/// checked here before anything is staged.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Read an extract file and return its raw records and metadata.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(Vec<RawRecord>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = file
            .metadata()
            .map_err(|e| Error::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents),
        };
        debug!(delimiter = %(delimiter as char), "reading extract");

        let rows = self.read_records(&contents, delimiter)?;

        let format = match delimiter {
            b',' => "csv",
            b';' => "csv-semicolon",
            b'\t' => "tsv",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(path.to_path_buf(), hash, size_bytes, format, rows.len());
        Ok((rows, metadata))
    }

    /// Parse bytes into raw records.
    ///
    /// Cells are decoded permissively: invalid byte sequences are replaced,
    /// never fatal. An empty cell becomes an absent field.
    fn read_records(&self, bytes: &[u8], delimiter: u8) -> Result<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();

        // Locate every contract column up front; a missing one aborts the
        // run before staging.
        let mut positions = [0usize; SOURCE_COLUMNS.len()];
        for (slot, (column, _)) in positions.iter_mut().zip(SOURCE_COLUMNS.iter()) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| Error::SchemaMismatch {
                    column: column.to_string(),
                })?;
        }

        let mut rows = Vec::new();
        for result in reader.byte_records() {
            let record = result?;
            let cell = |idx: usize| -> Option<String> {
                match record.get(idx) {
                    Some(raw) if !raw.is_empty() => {
                        Some(String::from_utf8_lossy(raw).into_owned())
                    }
                    _ => None,
                }
            };

            rows.push(RawRecord {
                id: cell(positions[0]),
                name: cell(positions[1]),
                host_id: cell(positions[2]),
                neighbourhood: cell(positions[3]),
                latitude: cell(positions[4]),
                longitude: cell(positions[5]),
                room_type: cell(positions[6]),
                price: cell(positions[7]),
                minimum_nights: cell(positions[8]),
                number_of_reviews: cell(positions[9]),
                last_review: cell(positions[10]),
                reviews_per_month: cell(positions[11]),
                availability_365: cell(positions[12]),
            });
        }

        Ok(rows)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Picks the candidate whose per-line count is consistent and highest,
/// falling back to comma.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let Some(&first_count) = counts.first() else {
            continue;
        };
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
