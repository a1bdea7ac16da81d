//! Upload preview: delimiter sniffing, header classification, and sample
//! extraction over a raw byte buffer.
//!
//! The pipeline is pure and bounded: strip the BOM, sniff the delimiter over
//! a fixed prefix, tokenize at most `sample_rows + 1` records, classify the
//! first record against the second, then either normalize the header row or
//! synthesize positional names. Large uploads never need a full parse for a
//! preview.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cli::PreviewArgs,
    headers, io_utils, printable_delimiter, profile,
    sniff::{self, SniffConfig},
    table,
};

pub const DEFAULT_SAMPLE_ROWS: usize = 20;

/// Explicit configuration for [`build_preview`]; no ambient state.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Number of sample rows to return; one extra record is read to cover a
    /// potential header.
    pub sample_rows: usize,
    /// Skip sniffing and use this delimiter when set.
    pub delimiter: Option<u8>,
    pub sniff: SniffConfig,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            delimiter: None,
            sniff: SniffConfig::default(),
        }
    }
}

/// Preview of an upload, shaped for the JSON wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Detected delimiter as a one-character string.
    pub delimiter: String,
    pub has_header: bool,
    pub headers: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
    /// Number of sample rows returned.
    pub count_guessed: usize,
}

/// Preview failures are client-input errors: the upload itself could not be
/// tokenized. They are final for the request, never retryable, and never
/// partial — a malformed record aborts the whole preview.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("malformed record at line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: csv::Error,
    },
}

/// Runs the full preview pipeline over a raw upload buffer.
///
/// Zero records is not an error: the result reports no header, no headers,
/// and no sample rows.
pub fn build_preview(bytes: &[u8], options: &PreviewOptions) -> Result<Preview, PreviewError> {
    let body = io_utils::strip_bom(bytes);
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| sniff::sniff_delimiter(body, &options.sniff));

    let mut reader = io_utils::lenient_csv_reader(body, delimiter);
    let mut records: Vec<Vec<String>> = Vec::with_capacity(options.sample_rows + 1);
    for (idx, record) in reader.records().take(options.sample_rows + 1).enumerate() {
        let record = record.map_err(|source| PreviewError::Malformed {
            line: idx + 1,
            source,
        })?;
        records.push(record.iter().map(str::to_string).collect());
    }

    let mut has_header = false;
    let mut column_names = Vec::new();
    let mut sample_rows = records;
    if let [first, rest @ ..] = sample_rows.as_slice() {
        if profile::detect_header(first, rest.first().map(Vec::as_slice)) {
            has_header = true;
            let header_record = sample_rows.remove(0);
            column_names = headers::normalize_headers(&header_record);
        } else {
            column_names = headers::synthesize_headers(first.len());
        }
    }

    let count_guessed = sample_rows.len();
    Ok(Preview {
        delimiter: (delimiter as char).to_string(),
        has_header,
        headers: column_names,
        sample_rows,
        count_guessed,
    })
}

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let raw = io_utils::read_input_bytes(&args.input)?;
    let bytes = io_utils::transcode_to_utf8(raw, encoding)?;

    let options = PreviewOptions {
        sample_rows: args.rows,
        delimiter: args.delimiter,
        ..PreviewOptions::default()
    };
    let preview = build_preview(&bytes, &options)?;

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &preview)
            .context("Writing preview JSON")?;
        println!();
    } else {
        table::print_table(&preview.headers, &preview.sample_rows);
    }
    info!(
        "Previewed {} row(s) from {:?} (delimiter '{}', header: {})",
        preview.count_guessed,
        args.input,
        printable_delimiter(preview.delimiter.as_bytes()[0]),
        preview.has_header
    );
    Ok(())
}
