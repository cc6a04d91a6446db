//! Repeated analyses of the same text must be bit-identical.

use pretty_assertions::assert_eq;
use vibecheck::{AnalysisMode, PatternLibrary, VibeEngine};

const SAMPLE: &str = "We're building our own HTTP retry and auth layer for talking to \
                      Stripe; haven't looked at their SDK yet. It's a quick fix \
                      workaround until we integrate with the billing service properly.";

#[test]
fn test_fast_mode_is_deterministic() {
    let engine = VibeEngine::new(PatternLibrary::load().unwrap());
    let first = engine.analyze(SAMPLE, AnalysisMode::Fast, None).unwrap();
    for _ in 0..10 {
        let next = engine.analyze(SAMPLE, AnalysisMode::Fast, None).unwrap();
        assert_eq!(first, next);
    }
}

#[test]
fn test_determinism_across_engine_instances() {
    let a = VibeEngine::new(PatternLibrary::load().unwrap())
        .analyze(SAMPLE, AnalysisMode::Fast, None)
        .unwrap();
    let b = VibeEngine::new(PatternLibrary::load().unwrap())
        .analyze(SAMPLE, AnalysisMode::Fast, None)
        .unwrap();

    // Compare serialized form as well: identical bytes, not just Eq.
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_deep_mode_without_reasoner_is_deterministic() {
    let engine = VibeEngine::new(PatternLibrary::load().unwrap());
    let first = engine.analyze(SAMPLE, AnalysisMode::Deep, None).unwrap();
    let second = engine.analyze(SAMPLE, AnalysisMode::Deep, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_analyses_agree() {
    use rayon::prelude::*;

    let engine = VibeEngine::new(PatternLibrary::load().unwrap());
    let baseline = engine.analyze(SAMPLE, AnalysisMode::Fast, None).unwrap();

    // The engine is shared read-only across threads; results must not
    // depend on scheduling.
    let results: Vec<_> = (0..32)
        .into_par_iter()
        .map(|_| engine.analyze(SAMPLE, AnalysisMode::Fast, None).unwrap())
        .collect();
    for result in results {
        assert_eq!(baseline, result);
    }
}
