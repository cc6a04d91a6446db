use crate::core::{AnalysisMode, VibeLevel, VibeVerdict};
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One analyzed document plus the envelope the CLI adds around the
/// verdict. The verdict itself stays deterministic; the timestamp
/// lives out here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub input: String,
    pub mode: AnalysisMode,
    pub generated_at: DateTime<Utc>,
    pub verdict: VibeVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_reports(&mut self, reports: &[AnalysisReport]) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_reports(&mut self, reports: &[AnalysisReport]) -> anyhow::Result<()> {
        let json = match reports {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let verdict = &report.verdict;
        writeln!(self.writer, "## {} — {}", report.input, verdict.level.headline())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Mode: {} · Provenance: {} · Generated: {}",
            report.mode,
            verdict.provenance,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", verdict.rationale)?;
        writeln!(self.writer)?;

        if verdict.contributing_patterns.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "| Pattern | Confidence | Detected |")?;
        writeln!(self.writer, "|---------|------------|----------|")?;
        for detection in &verdict.contributing_patterns {
            writeln!(
                self.writer,
                "| {} | {:.2} | {} |",
                detection.pattern_id,
                detection.confidence,
                if detection.detected { "yes" } else { "no" }
            )?;
        }
        writeln!(self.writer)?;

        for detection in verdict.detected_patterns() {
            writeln!(self.writer, "### Evidence: {}", detection.pattern_id)?;
            writeln!(self.writer)?;
            for excerpt in &detection.evidence {
                writeln!(self.writer, "- {excerpt}")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_reports(&mut self, reports: &[AnalysisReport]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Vibecheck Report")?;
        writeln!(self.writer)?;
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let verdict = &report.verdict;
        let headline = match verdict.level {
            VibeLevel::Good => verdict.level.headline().green().bold(),
            VibeLevel::NeedsResearch => verdict.level.headline().cyan().bold(),
            VibeLevel::NeedsPoc => verdict.level.headline().yellow().bold(),
            VibeLevel::Complex => verdict.level.headline().magenta().bold(),
            VibeLevel::Bad => verdict.level.headline().red().bold(),
        };
        writeln!(self.writer, "{} — {}", report.input.as_str().bold(), headline)?;
        writeln!(
            self.writer,
            "  mode {} · provenance {}",
            report.mode, verdict.provenance
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  {}", verdict.rationale)?;
        writeln!(self.writer)?;

        if !verdict.contributing_patterns.is_empty() {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec![
                "Pattern",
                "Confidence",
                "Detected",
                "Top evidence",
            ]);
            for detection in &verdict.contributing_patterns {
                table.add_row(vec![
                    detection.pattern_id.clone(),
                    format!("{:.2}", detection.confidence),
                    if detection.detected { "yes" } else { "no" }.to_string(),
                    detection
                        .evidence
                        .first()
                        .cloned()
                        .unwrap_or_default(),
                ]);
            }
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_reports(&mut self, reports: &[AnalysisReport]) -> anyhow::Result<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PatternDetection, Provenance};

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            input: "issue-42.md".to_string(),
            mode: AnalysisMode::Fast,
            generated_at: DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            verdict: VibeVerdict {
                level: VibeLevel::Bad,
                provenance: Provenance::Fast,
                confidence_summary: 0.79,
                contributing_patterns: vec![PatternDetection {
                    pattern_id: "infrastructure_without_implementation".to_string(),
                    confidence: 0.79,
                    detected: true,
                    threshold: 0.5,
                    evidence: vec!["building our own http retry".to_string()],
                }],
                rationale: "Custom infrastructure is planned.".to_string(),
            },
        }
    }

    #[test]
    fn test_json_writer_single_report_is_object() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_reports(&[sample_report()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["verdict"]["level"], "bad");
        assert_eq!(value["verdict"]["provenance"], "fast");
    }

    #[test]
    fn test_json_writer_many_reports_is_array() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_reports(&[sample_report(), sample_report()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_markdown_writer_includes_detection_table() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf)
            .write_reports(&[sample_report()])
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Vibecheck Report"));
        assert!(text.contains("| infrastructure_without_implementation | 0.79 | yes |"));
        assert!(text.contains("- building our own http retry"));
    }

    #[test]
    fn test_terminal_writer_renders() {
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf)
            .write_reports(&[sample_report()])
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("issue-42.md"));
        assert!(text.contains("infrastructure_without_implementation"));
    }
}
