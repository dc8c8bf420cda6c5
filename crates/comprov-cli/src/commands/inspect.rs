//! Inspect command - show what a single receipt yields.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use comprov_core::{
    derived_file_name, NameExtractor, PaymentCategory, PdfExtractor, PdfProcessor,
    PixReceiptExtractor,
};

use super::{load_config, OutputFormat};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Category used to show the derived file name
    #[arg(short = 't', long)]
    category: Option<PaymentCategory>,

    /// Print the raw extracted text
    #[arg(long)]
    text: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// What was found in one receipt.
#[derive(Debug, Serialize)]
struct Inspection {
    file: String,
    pages: u32,
    template: String,
    person_name: Option<String>,
    matched: Option<String>,
    new_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Inspecting file: {}", args.input.display());

    // Load PDF
    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::from_config(&config.pdf);
    extractor.load(&data)?;

    let pages = extractor.page_count();
    debug!("PDF has {} pages", pages);

    // Extract text and find the recipient
    let text = extractor.extract_text()?;
    let name_extractor = PixReceiptExtractor::from_config(&config.extraction)?;
    let found = name_extractor.extract_match(&text);

    let categories: Vec<PaymentCategory> = match args.category {
        Some(category) => vec![category],
        None => PaymentCategory::ALL.to_vec(),
    };

    let inspection = Inspection {
        file: args.input.display().to_string(),
        pages,
        template: name_extractor.template().to_string(),
        person_name: found.as_ref().map(|m| m.value.clone()),
        matched: found.as_ref().map(|m| m.source.clone()),
        new_names: found
            .as_ref()
            .map(|m| {
                categories
                    .iter()
                    .map(|c| derived_file_name(&m.value, *c))
                    .collect()
            })
            .unwrap_or_default(),
        text: args.text.then(|| text.clone()),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inspection)?),
        OutputFormat::Csv => println!("{}", format_inspection_csv(&inspection)?),
        OutputFormat::Text => print!("{}", format_inspection_text(&inspection)),
    }

    if inspection.person_name.is_none() {
        anyhow::bail!("Could not extract the recipient name from {}", inspection.file);
    }

    Ok(())
}

fn format_inspection_csv(inspection: &Inspection) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["file", "pages", "person_name", "new_name"])?;
    let pages = inspection.pages.to_string();
    let person_name = inspection.person_name.clone().unwrap_or_default();

    if inspection.new_names.is_empty() {
        wtr.write_record([inspection.file.as_str(), pages.as_str(), "", ""])?;
    }
    for new_name in &inspection.new_names {
        wtr.write_record([
            inspection.file.as_str(),
            pages.as_str(),
            person_name.as_str(),
            new_name.as_str(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_inspection_text(inspection: &Inspection) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", inspection.file));
    output.push_str(&format!("Pages: {}\n", inspection.pages));
    output.push_str(&format!("Template: {}\n", inspection.template));

    match &inspection.person_name {
        Some(name) => {
            output.push_str(&format!("{} Recipient: {}\n", style("✓").green(), style(name).bold()));
            for new_name in &inspection.new_names {
                output.push_str(&format!("  -> {}\n", new_name));
            }
        }
        None => output.push_str(&format!("{} Recipient: not found\n", style("✗").red())),
    }

    if let Some(text) = &inspection.text {
        output.push('\n');
        output.push_str("Extracted text:\n");
        output.push_str(text);
        output.push('\n');
    }

    output
}
