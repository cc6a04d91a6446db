//! Static registry of anti-pattern definitions.
//!
//! The library is declarative data: signal rules, weights, and
//! thresholds live on the definitions so they can be recalibrated
//! (including via `.vibecheck.toml` overrides) without touching the
//! scoring algorithm. Loaded once at startup, immutable afterwards,
//! safely shared across concurrent analysis calls.

pub mod builtin;

use crate::core::{Error, Polarity, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Broad grouping used by the vibe level classifier's decision table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Custom infrastructure planned before the standard approach was
    /// validated.
    Infrastructure,
    /// Third-party integration proposed without a working minimal call.
    Integration,
    /// Standard documentation / prior art not reviewed.
    Research,
    /// Complexity added beyond what the problem requires.
    Complexity,
    /// Process smells (symptom patching, error suppression).
    Process,
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatternCategory::Infrastructure => "infrastructure",
            PatternCategory::Integration => "integration",
            PatternCategory::Research => "research",
            PatternCategory::Complexity => "complexity",
            PatternCategory::Process => "process",
        };
        f.write_str(s)
    }
}

/// Named structural checks evaluated against the original-case text.
///
/// The set is closed: structural signals are dispatched through a single
/// match, not an open trait hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralMarker {
    /// Document has no test/validation section or test-plan language.
    MissingTestPlan,
    /// Document references no URL and no documentation at all.
    MissingResearchReference,
}

/// One detectable textual feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalKind {
    /// Phrase list matched case-insensitively against the normalized
    /// (lower-cased, whitespace-collapsed) text.
    KeywordSet { keywords: Vec<String> },
    /// Regular expression run against the original-case text.
    /// Case-sensitive unless the rule opts out.
    Regex {
        pattern: String,
        #[serde(default)]
        case_insensitive: bool,
    },
    /// Named structural check (see [`StructuralMarker`]).
    Structural { marker: StructuralMarker },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalRule {
    pub id: String,
    pub kind: SignalKind,
    /// Contribution to confidence when matched, in [0,1].
    pub weight: f64,
    pub polarity: Polarity,
}

/// Immutable definition of one anti-pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AntiPatternDefinition {
    pub id: String,
    pub name: String,
    pub category: PatternCategory,
    /// Relative importance of this pattern's supporting signals, > 0.
    pub base_weight: f64,
    /// Confidence at or above this value counts as detected, in (0,1].
    pub detection_threshold: f64,
    /// Only evaluated locally in deep mode.
    #[serde(default)]
    pub deep_only: bool,
    pub signals: Vec<SignalRule>,
}

impl AntiPatternDefinition {
    /// Sum of declared supporting weights; the scorer's normalization
    /// constant. Validation guarantees this is positive.
    pub fn support_normalization(&self) -> f64 {
        self.signals
            .iter()
            .filter(|s| s.polarity == Polarity::Supports)
            .map(|s| s.weight)
            .sum()
    }
}

/// Per-pattern tuning knobs accepted from `.vibecheck.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternOverride {
    pub base_weight: Option<f64>,
    pub detection_threshold: Option<f64>,
    pub enabled: Option<bool>,
}

/// A signal rule with its matcher pre-compiled at load time.
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: SignalRule,
    pub(crate) matcher: CompiledMatcher,
}

#[derive(Debug)]
pub(crate) enum CompiledMatcher {
    /// Keywords pre-lowered for matching against normalized text.
    Keywords(Vec<String>),
    Pattern(Regex),
    Structural(StructuralMarker),
}

/// An anti-pattern definition plus its compiled rules.
#[derive(Debug)]
pub struct CompiledPattern {
    def: AntiPatternDefinition,
    pub(crate) rules: Vec<CompiledRule>,
    normalization: f64,
}

impl CompiledPattern {
    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn definition(&self) -> &AntiPatternDefinition {
        &self.def
    }

    pub fn category(&self) -> PatternCategory {
        self.def.category
    }

    pub fn base_weight(&self) -> f64 {
        self.def.base_weight
    }

    pub fn detection_threshold(&self) -> f64 {
        self.def.detection_threshold
    }

    pub fn deep_only(&self) -> bool {
        self.def.deep_only
    }

    pub fn support_normalization(&self) -> f64 {
        self.normalization
    }
}

/// The loaded, validated pattern registry. Definition order is stable
/// so repeated analyses see identical iteration order.
#[derive(Debug)]
pub struct PatternLibrary {
    patterns: Vec<CompiledPattern>,
    index: HashMap<String, usize>,
}

impl PatternLibrary {
    /// Load the built-in library with no overrides.
    pub fn load() -> Result<Self> {
        Self::from_definitions(builtin::definitions())
    }

    /// Load the built-in library, applying per-pattern overrides.
    ///
    /// Overrides naming an unknown pattern are rejected: a typo in the
    /// config should fail loudly at startup, not silently tune nothing.
    pub fn load_with(overrides: &HashMap<String, PatternOverride>) -> Result<Self> {
        let mut defs = builtin::definitions();

        for (id, ov) in overrides {
            let def = defs
                .iter_mut()
                .find(|d| &d.id == id)
                .ok_or_else(|| Error::Config(format!("override for unknown pattern '{id}'")))?;
            if let Some(w) = ov.base_weight {
                def.base_weight = w;
            }
            if let Some(t) = ov.detection_threshold {
                def.detection_threshold = t;
            }
        }

        let disabled: Vec<&String> = overrides
            .iter()
            .filter(|(_, ov)| ov.enabled == Some(false))
            .map(|(id, _)| id)
            .collect();
        defs.retain(|d| !disabled.contains(&&d.id));

        Self::from_definitions(defs)
    }

    /// Validate and compile a definition set. Any violation is a
    /// startup-fatal configuration error.
    pub fn from_definitions(defs: Vec<AntiPatternDefinition>) -> Result<Self> {
        let mut patterns = Vec::with_capacity(defs.len());
        let mut index = HashMap::with_capacity(defs.len());

        for def in defs {
            if index.contains_key(&def.id) {
                return Err(Error::Config(format!("duplicate pattern id '{}'", def.id)));
            }
            let compiled = compile_pattern(def)?;
            index.insert(compiled.def.id.clone(), patterns.len());
            patterns.push(compiled);
        }

        Ok(Self { patterns, index })
    }

    pub fn get(&self, id: &str) -> Option<&CompiledPattern> {
        self.index.get(id).map(|&i| &self.patterns[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn category_of(&self, id: &str) -> Option<PatternCategory> {
        self.get(id).map(|p| p.category())
    }
}

fn compile_pattern(def: AntiPatternDefinition) -> Result<CompiledPattern> {
    validate_definition(&def)?;

    let mut rules = Vec::with_capacity(def.signals.len());
    for rule in &def.signals {
        let matcher = compile_matcher(&def.id, rule)?;
        rules.push(CompiledRule {
            rule: rule.clone(),
            matcher,
        });
    }

    let normalization = def.support_normalization();
    Ok(CompiledPattern {
        def,
        rules,
        normalization,
    })
}

fn validate_definition(def: &AntiPatternDefinition) -> Result<()> {
    if def.id.trim().is_empty() {
        return Err(Error::Config("pattern with empty id".to_string()));
    }
    if def.signals.is_empty() {
        return Err(Error::invalid_pattern(&def.id, "empty signal set"));
    }
    if !(def.base_weight > 0.0) || !def.base_weight.is_finite() {
        return Err(Error::invalid_pattern(
            &def.id,
            format!("base_weight must be positive, got {}", def.base_weight),
        ));
    }
    if !(def.detection_threshold > 0.0 && def.detection_threshold <= 1.0) {
        return Err(Error::invalid_pattern(
            &def.id,
            format!(
                "detection_threshold must be in (0,1], got {}",
                def.detection_threshold
            ),
        ));
    }
    if def.signals.iter().all(|s| s.polarity != Polarity::Supports) {
        return Err(Error::invalid_pattern(
            &def.id,
            "no supporting signal; confidence could never rise above zero",
        ));
    }
    for rule in &def.signals {
        if rule.id.trim().is_empty() {
            return Err(Error::invalid_pattern(&def.id, "signal rule with empty id"));
        }
        if let SignalKind::KeywordSet { keywords } = &rule.kind {
            if keywords.is_empty() {
                return Err(Error::invalid_pattern(
                    &def.id,
                    format!("keyword rule '{}' has no keywords", rule.id),
                ));
            }
        }
    }
    Ok(())
}

fn compile_matcher(pattern_id: &str, rule: &SignalRule) -> Result<CompiledMatcher> {
    match &rule.kind {
        SignalKind::KeywordSet { keywords } => Ok(CompiledMatcher::Keywords(
            keywords.iter().map(|k| k.to_lowercase()).collect(),
        )),
        SignalKind::Regex {
            pattern,
            case_insensitive,
        } => {
            let source = if *case_insensitive {
                format!("(?i){pattern}")
            } else {
                pattern.clone()
            };
            let re = Regex::new(&source).map_err(|e| {
                Error::invalid_pattern(
                    pattern_id,
                    format!("rule '{}' has invalid regex: {e}", rule.id),
                )
            })?;
            Ok(CompiledMatcher::Pattern(re))
        }
        SignalKind::Structural { marker } => Ok(CompiledMatcher::Structural(*marker)),
    }
}
