use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use vkfossil_capture::Capture;
use vkfossil_export::{
    export_capture, ExportConfig, ExportStatus, ExportSummary, FOSSILIZE_CONVERTER,
};
use vkfossil_state::{CallKind, HandlePolicy};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Export(args) => cmd_export(args, &cli.format),
        Command::Inspect(args) => cmd_inspect(args, &cli.format),
        Command::Info => cmd_info(&cli.format),
    }
}

fn load_capture(path: &Path) -> anyhow::Result<Capture> {
    Capture::load(path).with_context(|| format!("reading capture {}", path.display()))
}

fn load_config(args: &ExportArgs) -> anyhow::Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ExportConfig::default(),
    };
    if args.pass_through {
        config.handle_policy = HandlePolicy::PassThrough;
    }
    if args.compact {
        config.pretty = false;
    }
    Ok(config)
}

fn cmd_export(args: ExportArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let capture = load_capture(&args.capture)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| FOSSILIZE_CONVERTER.output_path_for(&args.capture));

    let mut progress = |value: f32| tracing::debug!(progress = value, "export progress");
    let result = export_capture(&capture, &output, &config, Some(&mut progress));
    let status = ExportStatus::from_result(&result);

    match (result, format) {
        (Ok(summary), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&summary_json(&summary, status))?);
        }
        (Ok(summary), OutputFormat::Text) => print_summary(&summary),
        (Err(err), OutputFormat::Json) => {
            let report = serde_json::json!({ "status": status, "error": err.to_string() });
            println!("{}", serde_json::to_string_pretty(&report)?);
            std::process::exit(status.exit_code());
        }
        (Err(err), OutputFormat::Text) => {
            eprintln!("{} {}: {}", "✗".red().bold(), status.to_string().red(), err);
            std::process::exit(status.exit_code());
        }
    }
    Ok(())
}

fn summary_json(summary: &ExportSummary, status: ExportStatus) -> serde_json::Value {
    let entries: serde_json::Map<String, serde_json::Value> = summary
        .entries
        .iter()
        .map(|(kind, count)| (kind.blob_key().to_string(), (*count).into()))
        .collect();
    serde_json::json!({
        "status": status,
        "path": summary.path,
        "entries": entries,
        "recordsDecoded": summary.records_decoded,
        "recordsSkipped": summary.records_skipped,
        "objectsRecorded": summary.objects_recorded,
        "bytesWritten": summary.bytes_written,
    })
}

fn print_summary(summary: &ExportSummary) {
    println!(
        "{} Exported {} entries to {}",
        "✓".green().bold(),
        summary.total_entries().to_string().bold(),
        summary.path.display().to_string().bold()
    );
    for (kind, count) in &summary.entries {
        if *count > 0 {
            println!("  {:<24} {}", kind.to_string().cyan(), count);
        }
    }
    println!(
        "  Records: {} decoded, {} skipped ({} objects before dedup)",
        summary.records_decoded, summary.records_skipped, summary.objects_recorded
    );
    println!("  Size: {} bytes", summary.bytes_written);
}

fn cmd_inspect(args: InspectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let capture = load_capture(&args.capture)?;
    let rows: Vec<(usize, &str, Option<CallKind>)> = capture
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| (index, record.name.as_str(), CallKind::from_call_name(&record.name)))
        .filter(|(_, _, call)| match args.kind {
            Some(kind) => call.is_some_and(|c| c.object_kind() == kind),
            None => true,
        })
        .collect();

    if let OutputFormat::Json = format {
        let records: Vec<_> = rows
            .iter()
            .map(|(index, name, call)| {
                serde_json::json!({
                    "index": index,
                    "name": name,
                    "kind": call.map(|c| c.object_kind().to_string()),
                })
            })
            .collect();
        let report = serde_json::json!({
            "driver": capture.driver,
            "records": records,
            "buffers": capture.buffers.len(),
            "bufferBytes": capture.buffers.total_bytes(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Capture {} ({} driver)",
        args.capture.display().to_string().bold(),
        capture.driver.to_string().cyan()
    );
    println!(
        "  {} records, {} buffers ({} bytes)",
        capture.len(),
        capture.buffers.len(),
        capture.buffers.total_bytes()
    );
    for (index, name, call) in &rows {
        match call {
            Some(call) => println!(
                "  {:>6}  {} {}",
                index.to_string().dimmed(),
                name,
                format!("[{}]", call.object_kind()).green()
            ),
            None => println!("  {:>6}  {}", index.to_string().dimmed(), name.dimmed()),
        }
    }
    let supported = rows.iter().filter(|(_, _, call)| call.is_some()).count();
    println!("\n{} of {} listed records are exportable", supported, rows.len());
    Ok(())
}

fn cmd_info(format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&FOSSILIZE_CONVERTER)?);
        }
        OutputFormat::Text => {
            println!("{}", FOSSILIZE_CONVERTER.name.bold());
            println!("  {}", FOSSILIZE_CONVERTER.description);
            println!("  Extension: {}", FOSSILIZE_CONVERTER.extension.yellow());
            println!(
                "  Opens input: {}",
                if FOSSILIZE_CONVERTER.opens_input { "yes" } else { "no" }
            );
            println!("  Supported calls:");
            for call in CallKind::ALL {
                println!("    {} {}", call.call_name(), format!("[{}]", call.object_kind()).dimmed());
            }
        }
    }
    Ok(())
}
