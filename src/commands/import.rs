//! Detect, normalize, and import command handlers.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use restvault::config::RestvaultConfig;
use restvault::import::{ImportOptions, ImportReport, ImportService, detect, parse_blob};
use restvault::models::EntityKind;
use restvault::normalize_str;
use restvault::observability::global_event_bus;
use restvault::storage::{StoreBackend, open_store};

/// Exit code when some records were not imported.
const PARTIAL_FAILURE: u8 = 2;

/// How many failures are printed before summarizing the rest.
const MAX_LISTED_FAILURES: usize = 20;

/// Reads an export from a file, or from stdin when the path is `-`.
fn read_export(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read export from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Detect command.
pub fn cmd_detect(file: &Path) -> anyhow::Result<ExitCode> {
    let data = parse_blob(&read_export(file)?)?;
    println!("{}", detect(&data)?);
    Ok(ExitCode::SUCCESS)
}

/// Normalize command.
pub fn cmd_normalize(file: &Path, pretty: bool) -> anyhow::Result<ExitCode> {
    let export = normalize_str(&read_export(file)?)?;
    let json = if pretty {
        serde_json::to_string_pretty(&export)?
    } else {
        serde_json::to_string(&export)?
    };
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

/// Import command.
///
/// Normalization and the store writes run on a blocking task. With a
/// watched kind, the change events for that kind are printed once the
/// import finishes.
pub async fn cmd_import(
    config: &RestvaultConfig,
    file: PathBuf,
    dry_run: bool,
    store: Option<String>,
    watch: Option<String>,
) -> anyhow::Result<ExitCode> {
    let backend = match store {
        Some(name) => name.parse::<StoreBackend>()?,
        None => config.store.backend,
    };
    let watched = watch.map(|kind| kind.parse::<EntityKind>()).transpose()?;
    let mut changes = watched.map(|kind| global_event_bus().subscribe_kind(kind));
    let options = ImportOptions::default()
        .with_dry_run(dry_run || config.import.dry_run)
        .with_retry_conflicts(config.import.retry_conflicts);
    let sqlite_path = config.sqlite_path();
    let text = read_export(&file)?;

    tracing::info!(file = %file.display(), backend = %backend, dry_run = options.dry_run, "starting import");

    let report = tokio::task::spawn_blocking(move || -> restvault::Result<ImportReport> {
        let export = normalize_str(&text)?;
        let store = open_store(backend, &sqlite_path)?;
        ImportService::new(store)
            .with_event_bus(global_event_bus().clone())
            .with_options(options)
            .import_data(&export)
    })
    .await
    .context("import task failed")??;

    if let Some(changes) = changes.as_mut() {
        while let Ok(event) = changes.try_recv() {
            let action = if event.is_create() { "created" } else { "updated" };
            eprintln!("{action} {} {} {}", event.kind.as_str(), event.id, event.rev);
        }
    }

    print_report(&report);

    if report.has_failures() {
        Ok(ExitCode::from(PARTIAL_FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_report(report: &ImportReport) {
    if report.dry_run {
        println!("Dry run completed (no changes made):");
    }
    println!(
        "{} of {} records imported",
        report.written(),
        report.total()
    );
    for (kind, count) in &report.counts {
        println!("  {:<24}{count}", kind.as_str());
    }

    if report.failures.is_empty() {
        return;
    }
    println!();
    println!("Failures ({}):", report.failures.len());
    for failure in report.failures.iter().take(MAX_LISTED_FAILURES) {
        println!("  - {failure}");
    }
    if report.failures.len() > MAX_LISTED_FAILURES {
        println!(
            "  ... and {} more",
            report.failures.len() - MAX_LISTED_FAILURES
        );
    }
}
