//! I/O helpers shared by the CLI commands.
//!
//! Uploads reach the core as raw byte buffers: files are slurped whole (the
//! surrounding tooling imposes any size cap), `-` routes through stdin, and
//! an explicit `--input-encoding` is transcoded to UTF-8 up front via
//! `encoding_rs`. Readers are built centrally in lenient mode — variable
//! field counts are legal and quoting irregularities must not fail the
//! parse — so every command tokenizes uploads the same way.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

/// Removes a leading UTF-8 byte-order mark, if present.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Reads an entire input into memory; `-` reads stdin to EOF.
pub fn read_input_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if is_dash(path) {
        std::io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Reading upload from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut buffer)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    Ok(buffer)
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Transcodes a buffer to UTF-8. UTF-8 input passes through untouched so a
/// leading BOM survives for [`strip_bom`] to handle.
pub fn transcode_to_utf8(bytes: Vec<u8>, encoding: &'static Encoding) -> Result<Vec<u8>> {
    if encoding == UTF_8 {
        return Ok(bytes);
    }
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(anyhow!(
            "Failed to decode input with encoding {}",
            encoding.name()
        ));
    }
    Ok(text.into_owned().into_bytes())
}

/// Builds a tokenizer over an in-memory buffer: headers off (classification
/// happens downstream), ragged records allowed, lenient quoting.
pub fn lenient_csv_reader(bytes: &[u8], delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .double_quote(true)
        .from_reader(bytes)
}

/// Opens a CSV writer over a file, or stdout when the path is absent or `-`.
pub fn open_csv_writer(path: Option<&Path>, delimiter: u8) -> Result<csv::Writer<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout()),
    };
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_bom_removes_only_a_leading_marker() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBFa,b"), b"a,b");
        assert_eq!(strip_bom(b"a,b"), b"a,b");
        assert_eq!(strip_bom(b""), b"");
        // A BOM mid-buffer is payload, not a marker.
        assert_eq!(strip_bom(b"a\xEF\xBB\xBFb"), b"a\xEF\xBB\xBFb");
    }

    #[test]
    fn transcode_passes_utf8_through_unchanged() {
        let bytes = b"\xEF\xBB\xBFa,b".to_vec();
        assert_eq!(transcode_to_utf8(bytes.clone(), UTF_8).unwrap(), bytes);
    }

    #[test]
    fn transcode_decodes_windows_1252() {
        let decoded = transcode_to_utf8(
            vec![b'B', 0xE9, b'n', b'i', b'e'],
            encoding_rs::WINDOWS_1252,
        )
        .unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "Bénie");
    }

    #[test]
    fn lenient_reader_tolerates_ragged_and_misquoted_records() {
        let mut reader = lenient_csv_reader(b"a,b,c\n1,2\n\"x,y\n", b',');
        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.expect("record").iter().map(str::to_string).collect())
            .collect();
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[1].len(), 2);
        assert_eq!(records.len(), 3);
    }
}
