//! Rename command - process a batch of receipts into a ZIP archive.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use comprov_core::{
    replaced_entries, ArchiveBuilder, BatchProcessor, BatchResult, DocumentOutcome,
    PaymentCategory, ReplacedEntry,
};

use super::{load_config, OutputFormat};

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Payment category (salario, ajuda-custo)
    #[arg(short = 't', long)]
    category: PaymentCategory,

    /// Directory the archive is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Format of the per-file report
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also write a summary CSV next to the archive
    #[arg(long)]
    summary: bool,

    /// Report the new names without writing an archive
    #[arg(long)]
    dry_run: bool,
}

pub async fn run(args: RenameArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand the glob, keeping only PDFs
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No PDF files found for pattern: {}", args.input);
    }

    info!("Found {} receipts, category {}", files.len(), args.category);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Processing {} receipts...", files.len()));

    let processor = BatchProcessor::from_config(&config)?;
    let result = processor.process_paths(&files, args.category);

    pb.finish_and_clear();

    let report = format_report(&result.outcomes, args.format)?;
    println!("{}", report);

    // Shared names keep only the last receipt; say which ones were dropped
    let replaced = replaced_entries(&result.processed);
    if !replaced.is_empty() {
        eprint!("{}", format_replaced(&replaced));
    }

    if !args.dry_run {
        // Create output directory if needed
        fs::create_dir_all(&args.output_dir)?;

        if args.summary {
            let summary_path = args.output_dir.join("summary.csv");
            write_summary(&summary_path, &result)?;
            println!(
                "{} Summary written to {}",
                style("✓").green(),
                summary_path.display()
            );
        }

        if result.processed.is_empty() {
            warn!("No receipts were renamed, skipping archive");
        } else {
            let builder = ArchiveBuilder::from_config(&config.archive);
            let archive_name = builder.file_name(args.category, &Local::now().naive_local());
            let archive_path = args.output_dir.join(&archive_name);

            builder.write_to(&archive_path, &result.processed)?;
            println!(
                "{} Archive written to {}",
                style("✓").green(),
                archive_path.display()
            );
        }
    }

    print_totals(&result, start.elapsed());
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_replaced(replaced: &[ReplacedEntry]) -> String {
    let mut output = format!("{}\n", style("Replaced in archive:").yellow());
    for entry in replaced {
        output.push_str(&format!(
            "  {} {} replaced by {} as {}\n",
            style("!").yellow(),
            entry.replaced,
            entry.kept,
            entry.entry_name
        ));
    }
    output
}

fn print_totals(result: &BatchResult, elapsed: Duration) {
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        result.total(),
        elapsed
    );
    println!(
        "   {} renamed, {} failed",
        style(result.processed.len()).green(),
        style(result.errors.len()).red()
    );
}

fn format_report(outcomes: &[DocumentOutcome], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcomes)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            write_outcome_records(&mut wtr, outcomes)?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_report_text(outcomes)),
    }
}

fn format_report_text(outcomes: &[DocumentOutcome]) -> String {
    let mut output = String::new();

    let renamed: Vec<_> = outcomes.iter().filter(|o| o.is_success()).collect();
    let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_success()).collect();

    if !renamed.is_empty() {
        output.push_str(&format!("{}\n", style("Renamed:").green()));
        for outcome in renamed {
            if let DocumentOutcome::Renamed { person_name, new_name, .. } = outcome {
                output.push_str(&format!("  {} {}\n", style("✓").green(), style(person_name).bold()));
                output.push_str(&format!("      {}\n", new_name));
            }
        }
    }

    if !failed.is_empty() {
        output.push_str(&format!("{}\n", style("Errors:").red()));
        for outcome in failed {
            output.push_str(&format!("  {} {}\n", style("✗").red(), outcome));
        }
    }

    output
}

fn write_outcome_records<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    outcomes: &[DocumentOutcome],
) -> anyhow::Result<()> {
    // Write header
    wtr.write_record(["original_name", "status", "person_name", "new_name", "error"])?;

    for outcome in outcomes {
        match outcome {
            DocumentOutcome::Renamed {
                original_name,
                new_name,
                person_name,
            } => wtr.write_record([
                original_name.as_str(),
                "renamed",
                person_name.as_str(),
                new_name.as_str(),
                "",
            ])?,
            DocumentOutcome::Failed {
                original_name,
                message,
                ..
            } => wtr.write_record([original_name.as_str(), "failed", "", "", message.as_str()])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_summary(path: &Path, result: &BatchResult) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_outcome_records(&mut wtr, &result.outcomes)
}
