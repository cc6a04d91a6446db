// Export modules for library usage
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod detect;
pub mod engine;
pub mod io;
pub mod patterns;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    AnalysisMode, Error, EvidenceMatch, EvidenceSource, ExternalHint, PatternDetection, Polarity,
    Provenance, Result, VibeLevel, VibeVerdict,
};

pub use crate::engine::{ExternalReasoner, VibeEngine, DEFAULT_EXTERNAL_TIMEOUT};

pub use crate::patterns::{
    AntiPatternDefinition, PatternCategory, PatternLibrary, PatternOverride, SignalKind,
    SignalRule, StructuralMarker,
};

pub use crate::classify::{classify, rationale};
pub use crate::detect::{extract, normalize, NormalizedText};
pub use crate::scoring::{clamp01, score};

pub use crate::config::{load_config, VibecheckConfig};
pub use crate::io::{create_writer, AnalysisReport, OutputFormat, OutputWriter};
