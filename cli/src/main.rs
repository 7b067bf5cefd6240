//! pdfgrid CLI - PDF table extraction tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfgrid::{DetectorConfig, ExtractOptions, TableExtractor};

#[derive(Parser)]
#[command(name = "pdfgrid")]
#[command(version)]
#[command(about = "Extract tables from PDF pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten the first table on a page, one cell per line
    Cells {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Zero-indexed page number
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Emit a JSON array instead of plain lines
        #[arg(long)]
        json: bool,
    },

    /// Extract tables from one page or the whole document
    Tables {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Zero-indexed page number (omit to scan the whole document)
        #[arg(short, long)]
        page: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "tsv")]
        format: Format,

        /// Minimum rows for a detected table
        #[arg(long)]
        min_rows: Option<usize>,

        /// Minimum columns for a detected table
        #[arg(long)]
        min_columns: Option<usize>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Tab-separated rows
    Tsv,
    /// JSON with null for missing cells
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cells { input, page, json } => cmd_cells(&input, page, json),
        Commands::Tables {
            input,
            page,
            format,
            min_rows,
            min_columns,
        } => cmd_tables(&input, page, format, min_rows, min_columns),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_cells(input: &Path, page: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = TableExtractor::open(input)?;
    let cells = extractor.extract_cells(page)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
    } else {
        for cell in cells {
            println!("{}", cell);
        }
    }
    Ok(())
}

fn cmd_tables(
    input: &Path,
    page: Option<usize>,
    format: Format,
    min_rows: Option<usize>,
    min_columns: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut detector = DetectorConfig::new();
    if let Some(rows) = min_rows {
        detector = detector.with_min_rows(rows);
    }
    if let Some(columns) = min_columns {
        detector = detector.with_min_columns(columns);
    }
    let options = ExtractOptions::new().with_detector(detector);
    let extractor = TableExtractor::open_with_options(input, options)?;

    let tables: Vec<(usize, pdfgrid::Table)> = match page {
        Some(page) => extractor
            .extract_tables(page)?
            .into_iter()
            .map(|t| (page, t))
            .collect(),
        None => {
            let pb = ProgressBar::new(extractor.page_count() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages")
                    .unwrap()
                    .progress_chars("#>-"),
            );

            let mut all = Vec::new();
            for index in 0..extractor.page_count() {
                for table in extractor.extract_tables(index)? {
                    all.push((index, table));
                }
                pb.inc(1);
            }
            pb.finish_and_clear();
            all
        }
    };

    if tables.is_empty() {
        log::info!("no tables detected");
    }

    match format {
        Format::Tsv => {
            for (index, table) in &tables {
                println!("{}", format!("# page {}", index).cyan());
                println!("{}", table.plain_text());
            }
        }
        Format::Json => {
            let pages: Vec<serde_json::Value> = tables
                .iter()
                .map(|(index, table)| {
                    serde_json::json!({
                        "page": index,
                        "table": table,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let info = pdfgrid::document_info(input)?;

    println!("{}", "Document Information".bold());
    println!("  {}: {}", "File".cyan(), input.display());
    println!("  {}: {}", "PDF version".cyan(), info.pdf_version);
    println!("  {}: {}", "Pages".cyan(), info.page_count);
    if let Some(title) = &info.title {
        println!("  {}: {}", "Title".cyan(), title);
    }
    if let Some(author) = &info.author {
        println!("  {}: {}", "Author".cyan(), author);
    }
    if let Some(creator) = &info.creator {
        println!("  {}: {}", "Creator".cyan(), creator);
    }
    if let Some(producer) = &info.producer {
        println!("  {}: {}", "Producer".cyan(), producer);
    }
    if let Some(created) = &info.created {
        println!("  {}: {}", "Created".cyan(), created.to_rfc3339());
    }
    if let Some(modified) = &info.modified {
        println!("  {}: {}", "Modified".cyan(), modified.to_rfc3339());
    }
    println!("  {}: {}", "Encrypted".cyan(), info.encrypted);
    println!("  {}: {}", "Blank".cyan(), info.blank);
    Ok(())
}
