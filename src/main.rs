use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use coursemine::core::template::TranscriptTemplate;
use coursemine::extract::{PdfTokenReader, TokenSource};
use coursemine::pipeline::{assemble_rows, build_transcript, export_rows, PipelineConfig};
use coursemine::resolve::validate::validate_document;

#[derive(Parser, Debug)]
#[command(name = "coursemine")]
#[command(version, about = "Course-record extraction from fixed-layout transcript PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract course records from a transcript PDF
    Extract {
        /// Input transcript PDF
        input: PathBuf,

        /// Output CSV file (default: <input_name>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the rows as JSON next to the CSV
        #[arg(long)]
        json: bool,

        /// Disable status output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check a PDF against the fixed transcript template
    Validate {
        /// Input transcript PDF
        input: PathBuf,
    },

    /// Show basic information about a transcript PDF
    Info {
        /// Input transcript PDF
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            json,
            quiet,
        } => run_extract(input, output, json, quiet),
        Commands::Validate { input } => run_validate(input),
        Commands::Info { input } => run_info(input),
    }
}

fn run_extract(input: PathBuf, output: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let output = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{stem}.csv"))
    });

    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Output: {}", output.display());
    }

    let config = PipelineConfig::new(input.clone(), output.clone(), json);

    if !quiet {
        println!("\n[+] Resolving records...");
    }

    let transcript = build_transcript(&config)
        .with_context(|| format!("Failed to process transcript: {}", input.display()))?;
    let rows = assemble_rows(&transcript);

    if !quiet {
        println!("[+] Exporting {} row(s)...", rows.len());
    }

    export_rows(&rows, &config)
        .with_context(|| format!("Failed to export to: {}", output.display()))?;

    if !quiet {
        println!("\n[✓] Done! Results saved to: {}", output.display());
    }

    Ok(())
}

fn run_validate(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let reader = PdfTokenReader::new(input.clone());
    let doc = reader
        .extract()
        .with_context(|| format!("Failed to read PDF: {}", input.display()))?;

    match validate_document(&doc, &TranscriptTemplate::default()) {
        Ok(()) => {
            println!("[✓] {} matches the transcript template", input.display());
            Ok(())
        }
        Err(err) => anyhow::bail!("{}", err),
    }
}

fn run_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let reader = PdfTokenReader::new(input.clone());
    let doc = reader
        .extract()
        .with_context(|| format!("Failed to read PDF: {}", input.display()))?;

    println!("Transcript Information");
    println!("======================");
    println!("File: {}", input.display());
    println!("Pages: {}", doc.pages.len());
    for page in &doc.pages {
        println!(
            "- page {}: {:.0}x{:.0}, {} tokens",
            page.page,
            page.width,
            page.height,
            page.tokens.len()
        );
    }

    Ok(())
}
