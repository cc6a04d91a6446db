//! Confidence scoring: aggregates raw signal matches for one pattern
//! into a single confidence value in [0,1] with a pass/fail detection
//! threshold.

use crate::core::{EvidenceMatch, PatternDetection, Polarity, MAX_EVIDENCE_EXCERPTS};
use crate::patterns::CompiledPattern;
use std::cmp::Ordering;

/// Clamp into [0,1]; non-finite values collapse to 0.
pub fn clamp01(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

/// Score one pattern's matches.
///
/// Supporting occurrences of the same rule contribute at half weight
/// from the second occurrence on, so a single repeated keyword cannot
/// saturate confidence. Suppressing occurrences each count at full
/// weight; over-suppression is safe because confidence clamps at 0.
/// The normalization constant is the sum of the pattern's declared
/// supporting weights: a pattern whose every positive signal fires
/// once caps at 1.0 before suppression.
pub fn score(pattern: &CompiledPattern, matches: &[EvidenceMatch]) -> PatternDetection {
    let mut raw_support = 0.0;
    let mut raw_suppression = 0.0;

    for m in matches {
        if m.occurrences == 0 {
            continue;
        }
        let weight = sanitized_weight(m);
        let extra = (m.occurrences - 1) as f64;
        match m.polarity {
            Polarity::Supports => raw_support += weight + 0.5 * weight * extra,
            Polarity::Suppresses => raw_suppression += weight * m.occurrences as f64,
        }
    }

    let normalization = pattern.support_normalization();
    let confidence = if normalization > 0.0 {
        clamp01((raw_support * pattern.base_weight() - raw_suppression) / normalization)
    } else {
        // Unreachable for validated libraries; kept as a guard for
        // hand-built definitions.
        log::warn!(
            "pattern '{}' has zero support normalization",
            pattern.id()
        );
        0.0
    };

    PatternDetection {
        pattern_id: pattern.id().to_string(),
        confidence,
        detected: confidence >= pattern.detection_threshold(),
        threshold: pattern.detection_threshold(),
        evidence: collect_evidence(matches),
    }
}

fn sanitized_weight(m: &EvidenceMatch) -> f64 {
    if m.weight.is_finite() && (0.0..=1.0).contains(&m.weight) {
        m.weight
    } else {
        log::warn!(
            "signal weight out of range for {}/{}: {} (clamped)",
            m.pattern_id,
            m.rule_id,
            m.weight
        );
        clamp01(m.weight)
    }
}

/// Supporting excerpts, most salient first: higher-weighted rules lead,
/// ties broken by rule id so output is stable across calls.
fn collect_evidence(matches: &[EvidenceMatch]) -> Vec<String> {
    let mut supports: Vec<&EvidenceMatch> = matches
        .iter()
        .filter(|m| m.polarity == Polarity::Supports && m.occurrences > 0)
        .collect();
    supports.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    supports
        .iter()
        .flat_map(|m| m.excerpts.iter().cloned())
        .take(MAX_EVIDENCE_EXCERPTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EvidenceSource;
    use crate::patterns::{
        AntiPatternDefinition, PatternCategory, PatternLibrary, SignalKind, SignalRule,
    };

    fn test_library(threshold: f64, weights: &[(&str, f64, Polarity)]) -> PatternLibrary {
        let signals = weights
            .iter()
            .map(|(id, w, polarity)| SignalRule {
                id: id.to_string(),
                kind: SignalKind::KeywordSet {
                    keywords: vec![id.to_string()],
                },
                weight: *w,
                polarity: *polarity,
            })
            .collect();
        let def = AntiPatternDefinition {
            id: "probe".to_string(),
            name: "Probe".to_string(),
            category: PatternCategory::Process,
            base_weight: 1.0,
            detection_threshold: threshold,
            deep_only: false,
            signals,
        };
        PatternLibrary::from_definitions(vec![def]).unwrap()
    }

    fn evidence(rule_id: &str, weight: f64, occurrences: usize, polarity: Polarity) -> EvidenceMatch {
        EvidenceMatch {
            pattern_id: "probe".to_string(),
            rule_id: rule_id.to_string(),
            excerpts: vec![format!("excerpt for {rule_id}")],
            occurrences,
            weight,
            polarity,
            source: EvidenceSource::Local,
        }
    }

    #[test]
    fn test_zero_matches_zero_confidence() {
        let lib = test_library(0.5, &[("a", 0.5, Polarity::Supports)]);
        let d = score(lib.get("probe").unwrap(), &[]);
        assert_eq!(d.confidence, 0.0);
        assert!(!d.detected);
        assert!(d.evidence.is_empty());
    }

    #[test]
    fn test_all_supports_fire_caps_at_one() {
        let lib = test_library(
            0.5,
            &[("a", 0.6, Polarity::Supports), ("b", 0.4, Polarity::Supports)],
        );
        let matches = vec![
            evidence("a", 0.6, 1, Polarity::Supports),
            evidence("b", 0.4, 1, Polarity::Supports),
        ];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert!((d.confidence - 1.0).abs() < 1e-12);
        assert!(d.detected);
    }

    #[test]
    fn test_repeated_rule_diminishing_contribution() {
        let lib = test_library(
            0.5,
            &[("a", 0.4, Polarity::Supports), ("b", 0.6, Polarity::Supports)],
        );
        // Three occurrences of rule a: 0.4 + 0.2 + 0.2 = 0.8 raw.
        let matches = vec![evidence("a", 0.4, 3, Polarity::Supports)];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert!((d.confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_repetition_cannot_saturate_past_declared_share() {
        // One 0.3-weight rule repeated many times still scores well
        // under a full-library firing.
        let lib = test_library(
            0.9,
            &[("a", 0.3, Polarity::Supports), ("b", 0.7, Polarity::Supports)],
        );
        let matches = vec![evidence("a", 0.3, 4, Polarity::Supports)];
        let d = score(lib.get("probe").unwrap(), &matches);
        // 0.3 + 3 * 0.15 = 0.75 of a 1.0 normalization.
        assert!((d.confidence - 0.75).abs() < 1e-12);
        assert!(!d.detected);
    }

    #[test]
    fn test_suppression_never_negative() {
        let lib = test_library(
            0.5,
            &[("a", 0.3, Polarity::Supports), ("g", 0.9, Polarity::Suppresses)],
        );
        let matches = vec![
            evidence("a", 0.3, 1, Polarity::Supports),
            evidence("g", 0.9, 2, Polarity::Suppresses),
        ];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert_eq!(d.confidence, 0.0);
        assert!(!d.detected);
    }

    #[test]
    fn test_all_suppressed_clamps_to_zero() {
        let lib = test_library(
            0.5,
            &[("a", 0.3, Polarity::Supports), ("g", 0.5, Polarity::Suppresses)],
        );
        let matches = vec![evidence("g", 0.5, 1, Polarity::Suppresses)];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert_eq!(d.confidence, 0.0);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // Support weights sum to 1.0; a single 0.5 match scores exactly 0.5.
        let lib = test_library(
            0.5,
            &[("a", 0.5, Polarity::Supports), ("b", 0.5, Polarity::Supports)],
        );
        let matches = vec![evidence("a", 0.5, 1, Polarity::Supports)];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert_eq!(d.confidence, 0.5);
        assert!(d.detected, "confidence equal to threshold counts as detected");

        // One epsilon below the threshold is not detected.
        let matches = vec![evidence("a", 0.5 - 1e-9, 1, Polarity::Supports)];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert!(d.confidence < 0.5);
        assert!(!d.detected);
    }

    #[test]
    fn test_out_of_range_weight_clamped_not_propagated() {
        let lib = test_library(0.5, &[("a", 1.0, Polarity::Supports)]);
        // Runtime record claims weight 3.0; clamped to 1.0.
        let matches = vec![evidence("a", 3.0, 1, Polarity::Supports)];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert!((d.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_base_weight_scales_support_only() {
        let def = AntiPatternDefinition {
            id: "probe".to_string(),
            name: "Probe".to_string(),
            category: PatternCategory::Process,
            base_weight: 0.5,
            detection_threshold: 0.5,
            deep_only: false,
            signals: vec![
                SignalRule {
                    id: "a".to_string(),
                    kind: SignalKind::KeywordSet {
                        keywords: vec!["a".to_string()],
                    },
                    weight: 1.0,
                    polarity: Polarity::Supports,
                },
            ],
        };
        let lib = PatternLibrary::from_definitions(vec![def]).unwrap();
        let matches = vec![evidence("a", 1.0, 1, Polarity::Supports)];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert!((d.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_evidence_ordered_by_salience_and_capped() {
        let lib = test_library(
            0.5,
            &[
                ("low", 0.2, Polarity::Supports),
                ("high", 0.8, Polarity::Supports),
            ],
        );
        let mut low = evidence("low", 0.2, 1, Polarity::Supports);
        low.excerpts = vec!["l1".into(), "l2".into(), "l3".into()];
        let mut high = evidence("high", 0.8, 1, Polarity::Supports);
        high.excerpts = vec!["h1".into(), "h2".into(), "h3".into()];
        let d = score(lib.get("probe").unwrap(), &[low, high]);
        assert_eq!(d.evidence.len(), MAX_EVIDENCE_EXCERPTS);
        assert_eq!(d.evidence[0], "h1");
        assert_eq!(d.evidence[3], "l1");
    }

    #[test]
    fn test_suppressing_excerpts_not_in_evidence() {
        let lib = test_library(
            0.5,
            &[("a", 0.5, Polarity::Supports), ("g", 0.5, Polarity::Suppresses)],
        );
        let matches = vec![
            evidence("a", 0.5, 1, Polarity::Supports),
            evidence("g", 0.5, 1, Polarity::Suppresses),
        ];
        let d = score(lib.get("probe").unwrap(), &matches);
        assert!(d.evidence.iter().all(|e| !e.contains("g")));
    }
}
