//! Property: confidence stays in [0,1] for arbitrary evidence
//! combinations, including out-of-range weights and heavy suppression.

use proptest::prelude::*;
use vibecheck::core::{EvidenceMatch, EvidenceSource, Polarity};
use vibecheck::patterns::{
    AntiPatternDefinition, PatternCategory, PatternLibrary, SignalKind, SignalRule,
};
use vibecheck::scoring::score;

fn probe_library() -> PatternLibrary {
    let def = AntiPatternDefinition {
        id: "probe".to_string(),
        name: "Probe".to_string(),
        category: PatternCategory::Process,
        base_weight: 1.0,
        detection_threshold: 0.5,
        deep_only: false,
        signals: vec![
            SignalRule {
                id: "a".to_string(),
                kind: SignalKind::KeywordSet {
                    keywords: vec!["alpha".to_string()],
                },
                weight: 0.6,
                polarity: Polarity::Supports,
            },
            SignalRule {
                id: "b".to_string(),
                kind: SignalKind::KeywordSet {
                    keywords: vec!["beta".to_string()],
                },
                weight: 0.4,
                polarity: Polarity::Supports,
            },
            SignalRule {
                id: "g".to_string(),
                kind: SignalKind::KeywordSet {
                    keywords: vec!["gamma".to_string()],
                },
                weight: 0.5,
                polarity: Polarity::Suppresses,
            },
        ],
    };
    PatternLibrary::from_definitions(vec![def]).unwrap()
}

fn arbitrary_match() -> impl Strategy<Value = EvidenceMatch> {
    (
        "[a-z]{1,8}",
        -2.0f64..3.0f64,
        0usize..6,
        prop::bool::ANY,
    )
        .prop_map(|(rule_id, weight, occurrences, supports)| EvidenceMatch {
            pattern_id: "probe".to_string(),
            rule_id,
            excerpts: vec!["excerpt".to_string()],
            occurrences,
            weight,
            polarity: if supports {
                Polarity::Supports
            } else {
                Polarity::Suppresses
            },
            source: EvidenceSource::Local,
        })
}

proptest! {
    #[test]
    fn confidence_always_in_unit_interval(matches in prop::collection::vec(arbitrary_match(), 0..12)) {
        let library = probe_library();
        let pattern = library.get("probe").unwrap();
        let detection = score(pattern, &matches);

        prop_assert!(detection.confidence >= 0.0);
        prop_assert!(detection.confidence <= 1.0);
        prop_assert!(detection.confidence.is_finite());
        prop_assert_eq!(detection.detected, detection.confidence >= pattern.detection_threshold());
    }

    #[test]
    fn evidence_never_exceeds_cap(matches in prop::collection::vec(arbitrary_match(), 0..12)) {
        let library = probe_library();
        let pattern = library.get("probe").unwrap();
        let detection = score(pattern, &matches);
        prop_assert!(detection.evidence.len() <= 5);
    }
}
