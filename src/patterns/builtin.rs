//! Built-in anti-pattern definitions.
//!
//! Weights and thresholds here are the tuning surface; `.vibecheck.toml`
//! can recalibrate base weights and detection thresholds per pattern
//! without code changes.

use super::{AntiPatternDefinition, PatternCategory, SignalKind, SignalRule, StructuralMarker};
use crate::core::Polarity;

pub const INFRASTRUCTURE_WITHOUT_IMPLEMENTATION: &str = "infrastructure_without_implementation";
pub const UNTESTED_INTEGRATION: &str = "untested_integration";
pub const DOCUMENTATION_NEGLECT: &str = "documentation_neglect";
pub const COMPLEXITY_ESCALATION: &str = "complexity_escalation";
pub const SYMPTOM_DRIVEN_DEVELOPMENT: &str = "symptom_driven_development";

fn keywords(id: &str, weight: f64, words: &[&str]) -> SignalRule {
    SignalRule {
        id: id.to_string(),
        kind: SignalKind::KeywordSet {
            keywords: words.iter().map(|w| w.to_string()).collect(),
        },
        weight,
        polarity: Polarity::Supports,
    }
}

fn regex_ci(id: &str, weight: f64, pattern: &str) -> SignalRule {
    SignalRule {
        id: id.to_string(),
        kind: SignalKind::Regex {
            pattern: pattern.to_string(),
            case_insensitive: true,
        },
        weight,
        polarity: Polarity::Supports,
    }
}

fn structural(id: &str, weight: f64, marker: StructuralMarker) -> SignalRule {
    SignalRule {
        id: id.to_string(),
        kind: SignalKind::Structural { marker },
        weight,
        polarity: Polarity::Supports,
    }
}

fn guard_keywords(id: &str, weight: f64, words: &[&str]) -> SignalRule {
    SignalRule {
        polarity: Polarity::Suppresses,
        ..keywords(id, weight, words)
    }
}

fn guard_regex_ci(id: &str, weight: f64, pattern: &str) -> SignalRule {
    SignalRule {
        polarity: Polarity::Suppresses,
        ..regex_ci(id, weight, pattern)
    }
}

/// The default pattern registry.
pub fn definitions() -> Vec<AntiPatternDefinition> {
    vec![
        infrastructure_without_implementation(),
        untested_integration(),
        documentation_neglect(),
        complexity_escalation(),
        symptom_driven_development(),
    ]
}

/// Building custom infrastructure before validating the standard API.
fn infrastructure_without_implementation() -> AntiPatternDefinition {
    AntiPatternDefinition {
        id: INFRASTRUCTURE_WITHOUT_IMPLEMENTATION.to_string(),
        name: "Infrastructure Without Implementation".to_string(),
        category: PatternCategory::Infrastructure,
        base_weight: 1.0,
        detection_threshold: 0.5,
        deep_only: false,
        signals: vec![
            keywords(
                "custom_build_language",
                0.4,
                &[
                    "build our own",
                    "building our own",
                    "built our own",
                    "write our own",
                    "writing our own",
                    "roll our own",
                    "rolling our own",
                    "hand-rolled",
                    "from scratch",
                    "in-house implementation",
                ],
            ),
            regex_ci(
                "custom_layer_for_service",
                0.4,
                r"\b(?:custom|our own|in-house|bespoke)\s+(?:http|rest|grpc|auth(?:entication)?\s+layer|auth(?:entication)?\s+and|retry|caching|transport|client|server|sdk|wrapper|infrastructure)\b",
            ),
            regex_ci(
                "rejects_standard_tooling",
                0.3,
                r"\binstead of (?:using )?(?:the |their )?(?:official |standard )?(?:sdk|api|client|library)\b",
            ),
            keywords(
                "skipped_sdk_evaluation",
                0.3,
                &[
                    "haven't looked at their sdk",
                    "haven't looked at the sdk",
                    "haven't tried the sdk",
                    "haven't tried their sdk",
                    "without trying the sdk",
                    "skipping the sdk",
                    "sdk untested",
                ],
            ),
            guard_regex_ci(
                "standard_approach_validated",
                0.5,
                r"\b(?:tested|tried|evaluated|validated|benchmarked)\s+(?:the\s+|their\s+)?(?:official\s+)?(?:sdk|api|client library)\b",
            ),
            guard_keywords(
                "documented_sdk_limitation",
                0.4,
                &[
                    "sdk doesn't support",
                    "sdk does not support",
                    "documented limitation",
                    "proven insufficient",
                    "official sdk lacks",
                ],
            ),
        ],
    }
}

/// Third-party integration proposed with no working minimal call.
fn untested_integration() -> AntiPatternDefinition {
    AntiPatternDefinition {
        id: UNTESTED_INTEGRATION.to_string(),
        name: "Integration Without Proof of Concept".to_string(),
        category: PatternCategory::Integration,
        base_weight: 1.0,
        detection_threshold: 0.4,
        deep_only: false,
        signals: vec![
            regex_ci(
                "integration_intent",
                0.5,
                r"\bintegrat(?:e|ing|ion)\s+with\s+(?:the\s+)?[\w.-]+",
            ),
            keywords(
                "external_service_mention",
                0.3,
                &[
                    "third-party api",
                    "third party api",
                    "external api",
                    "external service",
                    "their api",
                    "vendor api",
                    "api integration",
                ],
            ),
            structural(
                "no_validation_section",
                0.3,
                StructuralMarker::MissingTestPlan,
            ),
            guard_regex_ci(
                "working_call_demonstrated",
                0.5,
                r"\b(?:successfully|already)\s+(?:calls?|called|calling|hits?|hitting|queried|tested)\b",
            ),
            guard_keywords(
                "poc_exists",
                0.5,
                &[
                    "proof of concept",
                    "proof-of-concept",
                    "poc complete",
                    "poc completed",
                    "working prototype",
                    "test endpoint",
                    "smoke test passed",
                    "minimal script",
                ],
            ),
        ],
    }
}

/// Building before researching standard approaches.
fn documentation_neglect() -> AntiPatternDefinition {
    AntiPatternDefinition {
        id: DOCUMENTATION_NEGLECT.to_string(),
        name: "Documentation Neglect".to_string(),
        category: PatternCategory::Research,
        base_weight: 1.0,
        detection_threshold: 0.4,
        deep_only: false,
        signals: vec![
            regex_ci(
                "research_not_done",
                0.45,
                r"\bhaven['’]?t\s+(?:looked(?:\s+(?:at|into))?|read|checked|reviewed|researched)\b",
            ),
            keywords(
                "research_skipped",
                0.35,
                &[
                    "didn't check the docs",
                    "didn't read the docs",
                    "no time to research",
                    "skip the research",
                    "skipping research",
                    "without reading the documentation",
                    "not sure what the api",
                    "unfamiliar with the api",
                ],
            ),
            structural(
                "no_reference_links",
                0.2,
                StructuralMarker::MissingResearchReference,
            ),
            guard_keywords(
                "research_completed",
                0.5,
                &[
                    "research completed",
                    "per the documentation",
                    "according to the docs",
                    "documentation says",
                    "after reading the docs",
                    "reviewed the documentation",
                    "docs confirm",
                ],
            ),
        ],
    }
}

/// Unjustified complexity escalation.
fn complexity_escalation() -> AntiPatternDefinition {
    AntiPatternDefinition {
        id: COMPLEXITY_ESCALATION.to_string(),
        name: "Complexity Escalation".to_string(),
        category: PatternCategory::Complexity,
        base_weight: 1.0,
        detection_threshold: 0.4,
        deep_only: false,
        signals: vec![
            keywords(
                "architecture_expansion",
                0.35,
                &[
                    "plugin architecture",
                    "abstraction layer",
                    "abstraction layers",
                    "generic framework",
                    "extensible framework",
                    "meta-framework",
                    "event-driven architecture",
                    "microservice architecture",
                    "enterprise-grade",
                ],
            ),
            regex_ci(
                "layer_count",
                0.35,
                r"\b(?:two|three|four|five|\d+)\s+(?:abstraction\s+)?layers?\b",
            ),
            regex_ci(
                "single_use_case",
                0.3,
                r"\bsingle\s+(?:current\s+)?use\s?-?case\b",
            ),
            keywords(
                "speculative_generality",
                0.25,
                &[
                    "just in case",
                    "might need it later",
                    "might need later",
                    "future-proof",
                    "for future flexibility",
                ],
            ),
            guard_keywords(
                "simplicity_stated",
                0.4,
                &[
                    "simplest thing",
                    "minimal change",
                    "keep it simple",
                    "small focused change",
                    "removed a layer",
                    "reduced complexity",
                ],
            ),
        ],
    }
}

/// Treating symptoms instead of root causes.
fn symptom_driven_development() -> AntiPatternDefinition {
    AntiPatternDefinition {
        id: SYMPTOM_DRIVEN_DEVELOPMENT.to_string(),
        name: "Symptom-Driven Development".to_string(),
        category: PatternCategory::Process,
        base_weight: 1.0,
        detection_threshold: 0.45,
        deep_only: false,
        signals: vec![
            keywords(
                "quick_fix_language",
                0.4,
                &[
                    "quick fix",
                    "quick-fix",
                    "workaround",
                    "band-aid",
                    "bandaid",
                    "temporary fix",
                    "hotfix on top",
                    "patch over",
                ],
            ),
            regex_ci(
                "error_suppression",
                0.35,
                r"\b(?:catch(?:es|ing)?|swallow(?:s|ing)?|suppress(?:es|ing)?|silenc(?:es?|ing)|ignor(?:es?|ing))\b[^.]{0,40}?\b(?:error|errors|exception|exceptions|failure|failures)\b",
            ),
            regex_ci("retry_around_failure", 0.25, r"\b(?:retry|retries|retrying)\s+until\b"),
            guard_keywords(
                "root_cause_addressed",
                0.5,
                &[
                    "root cause identified",
                    "addresses the root cause",
                    "fix the root cause",
                    "fixed the root cause",
                    "underlying cause",
                    "traced the failure",
                ],
            ),
        ],
    }
}
