use crate::core::AnalysisMode;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Local signal extraction only
    Fast,
    /// Local extraction plus external reasoning augmentation
    Deep,
}

impl From<ModeArg> for AnalysisMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fast => AnalysisMode::Fast,
            ModeArg::Deep => AnalysisMode::Deep,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Terminal,
    Json,
    Markdown,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vibecheck")]
#[command(about = "Engineering anti-pattern detection and vibe-level classification", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze documents for engineering anti-patterns
    Analyze {
        /// Files to analyze; reads stdin when empty and --text is absent
        inputs: Vec<PathBuf>,

        /// Inline text to analyze instead of files
        #[arg(long, conflicts_with = "inputs")]
        text: Option<String>,

        /// Analysis depth
        #[arg(short, long, value_enum, default_value = "fast")]
        mode: ModeArg,

        /// Extra context (issue title, labels) appended to each document
        #[arg(long)]
        context: Option<String>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormatArg>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path (defaults to .vibecheck.toml discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// List the loaded pattern library and exit
        #[arg(long = "list-patterns")]
        list_patterns: bool,
    },

    /// Create a default .vibecheck.toml configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
