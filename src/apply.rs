//! The `apply` command: remap a full upload onto a destination schema.
//!
//! Unlike preview, this reads the entire input. The header decision reuses
//! the same classifier the preview pipeline uses, so the two commands never
//! disagree about whether record one is data.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::ApplyArgs,
    headers, io_utils,
    mapping::{self, MappingRules},
    printable_delimiter, profile,
    sniff::{self, SniffConfig},
};

pub fn execute(args: &ApplyArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let raw = io_utils::read_input_bytes(&args.input)?;
    let bytes = io_utils::transcode_to_utf8(raw, encoding)?;
    let body = io_utils::strip_bom(&bytes);
    let delimiter = args
        .delimiter
        .unwrap_or_else(|| sniff::sniff_delimiter(body, &SniffConfig::default()));

    let mut reader = io_utils::lenient_csv_reader(body, delimiter);
    let mut records: Vec<Vec<String>> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Reading record {}", idx + 1))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    let rules = MappingRules::load(&args.rules)?;
    let (source_headers, rows) = split_header(records);
    let table = mapping::apply_mapping(&source_headers, &rows, &rules);

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &table)
            .context("Writing mapped table JSON")?;
        println!();
    } else {
        let output_delimiter = args.output_delimiter.unwrap_or(delimiter);
        let mut writer = io_utils::open_csv_writer(args.output.as_deref(), output_delimiter)?;
        writer
            .write_record(&table.normalized_headers)
            .context("Writing destination header")?;
        for row in &table.normalized_rows {
            writer.write_record(row).context("Writing mapped row")?;
        }
        writer.flush().context("Flushing mapped output")?;
    }

    info!(
        "Mapped {} row(s) from {:?} onto {} destination column(s) (delimiter '{}')",
        table.normalized_rows.len(),
        args.input,
        table.normalized_headers.len(),
        printable_delimiter(delimiter)
    );
    Ok(())
}

/// Splits a materialized table into source headers and data rows, running
/// the header classifier on the leading records. Headerless tables get
/// positional names sized to the first record.
fn split_header(mut records: Vec<Vec<String>>) -> (Vec<String>, Vec<Vec<String>>) {
    let Some(first) = records.first() else {
        return (Vec::new(), records);
    };
    if profile::detect_header(first, records.get(1).map(Vec::as_slice)) {
        let header_record = records.remove(0);
        (headers::normalize_headers(&header_record), records)
    } else {
        (headers::synthesize_headers(first.len()), records)
    }
}
