use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use orderline_model::ProcessedDocument;
use orderline_normalization::{batch_from_value, process_values, process_values_parallel};
use serde_json::Value;
use tracing::{info, info_span};

use crate::cli::{CatalogArgs, NormalizeArgs};
use crate::config::load_config;
use crate::summary::print_catalog;
use crate::types::BatchResult;

const STDIO_PATH: &str = "-";

pub fn run_normalize(args: &NormalizeArgs, log_data: bool) -> Result<BatchResult> {
    let source = args.input.display().to_string();
    let span = info_span!("normalize", source = %source);
    let _guard = span.enter();

    let config = load_config(args.config.as_deref())?;
    let context = config.into_context(args, log_data);

    let raw = read_input(&args.input)?;
    let batch: Value =
        serde_json::from_str(&raw).with_context(|| format!("parse JSON from {source}"))?;
    let values = batch_from_value(batch);

    let start = Instant::now();
    let outcomes = if args.parallel {
        process_values_parallel(values, &context)
    } else {
        process_values(values, &context)
    };
    info!(
        documents = outcomes.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );

    let (results, reports): (Vec<ProcessedDocument>, Vec<_>) = outcomes
        .into_iter()
        .map(|outcome| (outcome.result, outcome.report))
        .unzip();
    write_output(args.output.as_deref(), &results, args.pretty)?;

    Ok(BatchResult {
        source,
        output: args.output.clone(),
        gift_payments: context.gift_payments,
        non_finite_tax: context.non_finite_tax,
        reports,
    })
}

pub fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    print_catalog(&config.catalog);
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIO_PATH) {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("read order documents from stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("read order documents {}", path.display()))
}

fn write_output(path: Option<&Path>, results: &[ProcessedDocument], pretty: bool) -> Result<()> {
    let mut rendered = if pretty {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string(results)
    }
    .context("serialize processed documents")?;
    rendered.push('\n');

    match path {
        Some(path) if path != Path::new(STDIO_PATH) => fs::write(path, rendered)
            .with_context(|| format!("write processed documents {}", path.display())),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("write processed documents to stdout")
        }
    }
}
