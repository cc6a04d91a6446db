//! Vibe level classification: folds per-pattern detections into one
//! ordinal level plus a deterministic rationale.
//!
//! This is a pure function of the detection set; no state carries
//! across calls. The priority ordering below is a deliberate
//! tie-break: an infrastructure finding outranks everything else,
//! and an unproven integration outranks missing research.

use crate::core::{PatternDetection, VibeLevel};
use crate::patterns::{PatternCategory, PatternLibrary};

/// First matching rule wins:
/// 1. infrastructure detected           => Bad
/// 2. any integration pattern detected  => NeedsPoc
/// 3. research pattern detected         => NeedsResearch
/// 4. complexity pattern detected       => Complex
/// 5. otherwise                         => Good
pub fn classify(library: &PatternLibrary, detections: &[PatternDetection]) -> VibeLevel {
    let detected_category = |category: PatternCategory| {
        detections
            .iter()
            .any(|d| d.detected && library.category_of(&d.pattern_id) == Some(category))
    };

    if detected_category(PatternCategory::Infrastructure) {
        VibeLevel::Bad
    } else if detected_category(PatternCategory::Integration) {
        VibeLevel::NeedsPoc
    } else if detected_category(PatternCategory::Research) {
        VibeLevel::NeedsResearch
    } else if detected_category(PatternCategory::Complexity) {
        VibeLevel::Complex
    } else {
        VibeLevel::Good
    }
}

/// The highest-confidence detection in the category that decided the
/// level. `None` for `Good`.
pub fn deciding_detection<'a>(
    library: &PatternLibrary,
    detections: &'a [PatternDetection],
    level: VibeLevel,
) -> Option<&'a PatternDetection> {
    let category = match level {
        VibeLevel::Bad => PatternCategory::Infrastructure,
        VibeLevel::NeedsPoc => PatternCategory::Integration,
        VibeLevel::NeedsResearch => PatternCategory::Research,
        VibeLevel::Complex => PatternCategory::Complexity,
        VibeLevel::Good => return None,
    };
    detections
        .iter()
        .filter(|d| d.detected && library.category_of(&d.pattern_id) == Some(category))
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                // Stable winner when confidences tie.
                .then_with(|| b.pattern_id.cmp(&a.pattern_id))
        })
}

/// Fixed per-level template filled with the deciding pattern's top
/// excerpts. Identical detections produce identical text.
pub fn rationale(level: VibeLevel, deciding: Option<&PatternDetection>) -> String {
    let base = match level {
        VibeLevel::Good => {
            return "No anti-pattern signals crossed their detection thresholds.".to_string()
        }
        VibeLevel::NeedsResearch => {
            "Standard documentation does not appear to have been reviewed before committing to an approach."
        }
        VibeLevel::NeedsPoc => {
            "A third-party integration is proposed without evidence of a working minimal call."
        }
        VibeLevel::Complex => {
            "The proposal adds complexity beyond what the stated problem requires."
        }
        VibeLevel::Bad => {
            "Custom infrastructure is planned before the standard approach has been validated."
        }
    };

    match deciding {
        Some(d) => {
            let confidence = format!(" Confidence {:.0}%.", d.confidence * 100.0);
            let excerpts: Vec<&str> = d.evidence.iter().take(2).map(String::as_str).collect();
            if excerpts.is_empty() {
                format!("{base}{confidence}")
            } else {
                format!("{base}{confidence} Evidence: {}.", excerpts.join("; "))
            }
        }
        None => base.to_string(),
    }
}
