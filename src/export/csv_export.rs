use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::RecordRow;
use crate::export::Exporter;

#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_path: PathBuf,
}

impl CsvExporter {
    pub fn new(out_path: PathBuf) -> Self {
        Self { out_path }
    }
}

impl Exporter for CsvExporter {
    fn export(&self, rows: &[RecordRow]) -> Result<()> {
        if let Some(parent) = self.out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.out_path)
            .with_context(|| format!("failed to create {}", self.out_path.display()))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
