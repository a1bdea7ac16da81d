pub mod apply;
pub mod cli;
pub mod headers;
pub mod io_utils;
pub mod mapping;
pub mod preview;
pub mod profile;
pub mod sniff;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_intake", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => handle_probe(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Apply(args) => apply::execute(&args),
    }
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let raw = io_utils::read_input_bytes(&args.input)?;
    let bytes = io_utils::transcode_to_utf8(raw, encoding)?;

    // Two records are enough for the header contrast check.
    let options = preview::PreviewOptions {
        sample_rows: 1,
        delimiter: args.delimiter,
        ..preview::PreviewOptions::default()
    };
    let probed = preview::build_preview(&bytes, &options)
        .with_context(|| format!("Probing upload {:?}", args.input))?;

    println!(
        "delimiter: {}",
        printable_delimiter(probed.delimiter.as_bytes()[0])
    );
    println!("header: {}", if probed.has_header { "yes" } else { "no" });
    let rows = probed
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| vec![(idx + 1).to_string(), name.clone()])
        .collect::<Vec<_>>();
    let headers = vec!["#".to_string(), "column".to_string()];
    table::print_table(&headers, &rows);
    info!(
        "Probed {:?}: {} column(s), header detected: {}",
        args.input,
        probed.headers.len(),
        probed.has_header
    );
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
