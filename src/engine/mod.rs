//! Mode controller and the single analysis entry point.
//!
//! `VibeEngine` owns the immutable pattern library and orchestrates
//! extraction, scoring, and classification for one document per call.
//! Calls share no mutable state, so independent analyses can run fully
//! in parallel against one engine.

pub mod external;

pub use external::{ExternalReasoner, EXTERNAL_RULE_ID};

use crate::classify;
use crate::core::{
    AnalysisMode, Error, EvidenceMatch, EvidenceSource, Polarity, Provenance, Result, VibeVerdict,
};
use crate::detect::{extract, normalize};
use crate::patterns::{CompiledPattern, PatternLibrary};
use crate::scoring::score;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on the external reasoning step, matching the
/// collaborator's own 60-second default.
pub const DEFAULT_EXTERNAL_TIMEOUT: Duration = Duration::from_secs(60);

pub struct VibeEngine {
    library: Arc<PatternLibrary>,
    reasoner: Option<Arc<dyn ExternalReasoner>>,
    external_timeout: Duration,
}

impl VibeEngine {
    pub fn new(library: PatternLibrary) -> Self {
        Self::with_library(Arc::new(library))
    }

    pub fn with_library(library: Arc<PatternLibrary>) -> Self {
        Self {
            library,
            reasoner: None,
            external_timeout: DEFAULT_EXTERNAL_TIMEOUT,
        }
    }

    /// Attach the deep-mode external reasoning collaborator.
    pub fn with_reasoner(mut self, reasoner: Arc<dyn ExternalReasoner>) -> Self {
        self.reasoner = Some(reasoner);
        self
    }

    pub fn with_external_timeout(mut self, timeout: Duration) -> Self {
        self.external_timeout = timeout;
        self
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Analyze one document and produce a complete verdict.
    ///
    /// `repo_context` (extra title/comment text) is appended to the
    /// analyzed text; rejection judges the primary text only. Empty or
    /// whitespace-only input is rejected, never coerced into a `Good`
    /// verdict.
    pub fn analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
        repo_context: Option<&str>,
    ) -> Result<VibeVerdict> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "empty or whitespace-only document".to_string(),
            ));
        }

        let combined = match repo_context {
            Some(ctx) if !ctx.trim().is_empty() => format!("{text}\n{ctx}"),
            _ => text.to_string(),
        };
        let normalized = normalize(&combined);

        let active: Vec<&CompiledPattern> = self
            .library
            .patterns()
            .filter(|p| mode == AnalysisMode::Deep || !p.deep_only())
            .collect();

        let mut extracted: Vec<(&CompiledPattern, Vec<EvidenceMatch>)> = active
            .iter()
            .map(|p| (*p, extract(&normalized, p)))
            .collect();

        let provenance = match mode {
            AnalysisMode::Fast => Provenance::Fast,
            AnalysisMode::Deep => self.merge_external_evidence(&combined, &mut extracted),
        };

        let mut detections: Vec<_> = extracted
            .iter()
            .map(|(pattern, matches)| score(pattern, matches))
            .filter(|d| d.confidence > 0.0)
            .collect();
        detections.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.pattern_id.cmp(&b.pattern_id))
        });

        let level = classify::classify(&self.library, &detections);
        let deciding = classify::deciding_detection(&self.library, &detections, level);
        let rationale = classify::rationale(level, deciding);
        let confidence_summary = detections
            .iter()
            .filter(|d| d.detected)
            .map(|d| d.confidence)
            .fold(0.0, f64::max);

        Ok(VibeVerdict {
            level,
            provenance,
            confidence_summary,
            contributing_patterns: detections,
            rationale,
        })
    }

    /// Fetch external hints and fold them into the extracted evidence.
    /// Returns the provenance the verdict should carry.
    fn merge_external_evidence(
        &self,
        text: &str,
        extracted: &mut [(&CompiledPattern, Vec<EvidenceMatch>)],
    ) -> Provenance {
        let Some(reasoner) = &self.reasoner else {
            log::debug!("deep mode requested but no external reasoner is configured");
            return Provenance::Partial;
        };

        match external::reason_with_timeout(reasoner, text, self.external_timeout) {
            Ok(hints) => {
                for hint in hints {
                    match extracted
                        .iter_mut()
                        .find(|(p, _)| p.id() == hint.pattern_id)
                    {
                        Some((_, matches)) => matches.push(EvidenceMatch {
                            pattern_id: hint.pattern_id,
                            rule_id: EXTERNAL_RULE_ID.to_string(),
                            excerpts: vec![hint.justification],
                            occurrences: 1,
                            weight: hint.confidence,
                            polarity: Polarity::Supports,
                            source: EvidenceSource::External,
                        }),
                        None => log::warn!(
                            "{}: dropping hint for inactive or unknown pattern '{}'",
                            reasoner.name(),
                            hint.pattern_id
                        ),
                    }
                }
                Provenance::Deep
            }
            Err(e) => {
                log::warn!(
                    "{}: degrading to local evidence only: {e}",
                    reasoner.name()
                );
                Provenance::Partial
            }
        }
    }
}
