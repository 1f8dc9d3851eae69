use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::RecordRow;
use crate::export::Exporter;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_path: PathBuf,
}

impl JsonExporter {
    pub fn new(out_path: PathBuf) -> Self {
        Self { out_path }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, rows: &[RecordRow]) -> Result<()> {
        if let Some(parent) = self.out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(rows)?;
        fs::write(&self.out_path, data)?;
        Ok(())
    }
}
