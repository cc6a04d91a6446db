pub mod errors;

pub use errors::{Error, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of evidence excerpts carried on a single detection.
pub const MAX_EVIDENCE_EXCERPTS: usize = 5;

/// Maximum excerpts retained per signal rule. The full occurrence count
/// is kept on the match record even when excerpts are truncated.
pub const MAX_EXCERPTS_PER_RULE: usize = 3;

/// Five-way ordinal classification of overall risk, lowest risk first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibeLevel {
    Good,
    NeedsResearch,
    NeedsPoc,
    Complex,
    Bad,
}

impl VibeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VibeLevel::Good => "good",
            VibeLevel::NeedsResearch => "needs_research",
            VibeLevel::NeedsPoc => "needs_poc",
            VibeLevel::Complex => "complex",
            VibeLevel::Bad => "bad",
        }
    }

    /// Human headline used by the presentation writers.
    pub fn headline(&self) -> &'static str {
        match self {
            VibeLevel::Good => "✅ Good Vibes",
            VibeLevel::NeedsResearch => "🔍 Research Needed",
            VibeLevel::NeedsPoc => "🧪 POC Needed",
            VibeLevel::Complex => "⚖️ Complexity Check",
            VibeLevel::Bad => "🚨 Bad Vibes",
        }
    }
}

impl fmt::Display for VibeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Analysis depth requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    Fast,
    Deep,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Fast => f.write_str("fast"),
            AnalysisMode::Deep => f.write_str("deep"),
        }
    }
}

/// Where the evidence behind a verdict came from.
///
/// `Partial` marks a deep-mode verdict whose external augmentation was
/// unavailable; the verdict is built from local evidence only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Fast,
    Deep,
    Partial,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Fast => f.write_str("fast"),
            Provenance::Deep => f.write_str("deep"),
            Provenance::Partial => f.write_str("partial"),
        }
    }
}

/// Whether a matched signal argues for or against its pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Supports,
    Suppresses,
}

/// Origin of an evidence match: extracted locally or merged from the
/// external reasoning collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Local,
    External,
}

/// One signal rule's result against one document. A rule that matched
/// several spans is represented by a single record carrying the full
/// occurrence count plus a capped excerpt list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceMatch {
    pub pattern_id: String,
    pub rule_id: String,
    pub excerpts: Vec<String>,
    pub occurrences: usize,
    pub weight: f64,
    pub polarity: Polarity,
    pub source: EvidenceSource,
}

/// Scored result for one pattern against one document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternDetection {
    pub pattern_id: String,
    pub confidence: f64,
    pub detected: bool,
    pub threshold: f64,
    /// Supporting excerpts, most salient first, capped at
    /// [`MAX_EVIDENCE_EXCERPTS`].
    pub evidence: Vec<String>,
}

/// Final output of one analysis call. Fully self-describing: the
/// presentation layer never needs to re-run the analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VibeVerdict {
    pub level: VibeLevel,
    pub provenance: Provenance,
    /// Highest confidence among detected patterns; 0.0 when nothing
    /// crossed its threshold.
    pub confidence_summary: f64,
    /// Every pattern that produced any signal, confidence descending.
    pub contributing_patterns: Vec<PatternDetection>,
    pub rationale: String,
}

impl VibeVerdict {
    /// Detections that crossed their threshold, strongest first.
    pub fn detected_patterns(&self) -> impl Iterator<Item = &PatternDetection> {
        self.contributing_patterns.iter().filter(|d| d.detected)
    }
}

/// Typed evidence hint returned by the external reasoning collaborator
/// in deep mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExternalHint {
    pub pattern_id: String,
    pub confidence: f64,
    pub justification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibe_level_ordering() {
        assert!(VibeLevel::Good < VibeLevel::NeedsResearch);
        assert!(VibeLevel::NeedsResearch < VibeLevel::NeedsPoc);
        assert!(VibeLevel::NeedsPoc < VibeLevel::Complex);
        assert!(VibeLevel::Complex < VibeLevel::Bad);
    }

    #[test]
    fn test_level_serialization_uses_snake_case() {
        let json = serde_json::to_string(&VibeLevel::NeedsPoc).unwrap();
        assert_eq!(json, "\"needs_poc\"");
        let back: VibeLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VibeLevel::NeedsPoc);
    }

    #[test]
    fn test_provenance_labels() {
        assert_eq!(Provenance::Fast.to_string(), "fast");
        assert_eq!(Provenance::Deep.to_string(), "deep");
        assert_eq!(Provenance::Partial.to_string(), "partial");
    }

    #[test]
    fn test_detected_patterns_filters() {
        let verdict = VibeVerdict {
            level: VibeLevel::Good,
            provenance: Provenance::Fast,
            confidence_summary: 0.0,
            contributing_patterns: vec![
                PatternDetection {
                    pattern_id: "a".to_string(),
                    confidence: 0.3,
                    detected: false,
                    threshold: 0.5,
                    evidence: vec![],
                },
                PatternDetection {
                    pattern_id: "b".to_string(),
                    confidence: 0.6,
                    detected: true,
                    threshold: 0.5,
                    evidence: vec![],
                },
            ],
            rationale: String::new(),
        };
        let detected: Vec<_> = verdict.detected_patterns().collect();
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].pattern_id, "b");
    }
}
