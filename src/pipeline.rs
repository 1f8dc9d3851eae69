use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::{RecordRow, Transcript};
use crate::core::template::TranscriptTemplate;
use crate::export::{CsvExporter, Exporter, JsonExporter};
use crate::extract::{PdfTokenReader, TokenSource};
use crate::resolve::{self, TriplicateDedup};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json: bool,
}

impl PipelineConfig {
    pub fn new(input: PathBuf, output: PathBuf, json: bool) -> Self {
        Self {
            input,
            output,
            json,
        }
    }
}

/// Read, validate and resolve one transcript into the record tree.
pub fn build_transcript(config: &PipelineConfig) -> Result<Transcript> {
    let reader = PdfTokenReader::new(config.input.clone());
    let doc = reader.extract()?;
    let template = TranscriptTemplate::default();
    let transcript = resolve::resolve_transcript(&doc, &template, &TriplicateDedup)
        .with_context(|| format!("failed to resolve {}", config.input.display()))?;
    Ok(transcript)
}

/// Flatten the resolved tree into output rows.
pub fn assemble_rows(transcript: &Transcript) -> Vec<RecordRow> {
    resolve::assemble::assemble_rows(transcript)
}

/// Write the rows to the configured CSV path, and a JSON sibling when
/// requested. Column set and row order are preserved exactly.
pub fn export_rows(rows: &[RecordRow], config: &PipelineConfig) -> Result<()> {
    CsvExporter::new(config.output.clone())
        .export(rows)
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    if config.json {
        let json_path = config.output.with_extension("json");
        JsonExporter::new(json_path.clone())
            .export(rows)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
    }

    Ok(())
}
