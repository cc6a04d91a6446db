pub mod output;

pub use output::{create_writer, AnalysisReport, OutputFormat, OutputWriter};

use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
