use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ContractAnalysis;

/// Writes the full analysis (levels and statistics) as pretty-printed JSON.
pub fn export_analysis_json(path: &Path, analysis: &ContractAnalysis) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, analysis)
        .context(format!("Failed to serialize analysis to: {}", path.display()))
}
