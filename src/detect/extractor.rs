use super::normalize::NormalizedText;
use super::structural;
use crate::core::{EvidenceMatch, EvidenceSource, Polarity, MAX_EXCERPTS_PER_RULE};
use crate::patterns::{CompiledMatcher, CompiledPattern, CompiledRule};

/// Context kept around a matched span when building an excerpt.
const EXCERPT_CONTEXT: usize = 40;

/// Evaluate every signal rule of one pattern against the input.
///
/// Supporting rules run first; negation guards run after them and only
/// append `Suppresses` matches; they never remove supporting matches.
/// A rule that matched several spans yields one record with the full
/// occurrence count and a capped excerpt list.
pub fn extract(text: &NormalizedText, pattern: &CompiledPattern) -> Vec<EvidenceMatch> {
    let mut matches = Vec::new();
    for polarity in [Polarity::Supports, Polarity::Suppresses] {
        for compiled in pattern.rules.iter().filter(|r| r.rule.polarity == polarity) {
            if let Some(m) = evaluate_rule(text, pattern.id(), compiled) {
                matches.push(m);
            }
        }
    }
    matches
}

fn evaluate_rule(
    text: &NormalizedText,
    pattern_id: &str,
    compiled: &CompiledRule,
) -> Option<EvidenceMatch> {
    let (occurrences, excerpts) = match &compiled.matcher {
        CompiledMatcher::Keywords(phrases) => match_keywords(&text.lowered, phrases),
        CompiledMatcher::Pattern(re) => {
            let mut count = 0;
            let mut excerpts = Vec::new();
            for m in re.find_iter(&text.original) {
                count += 1;
                if excerpts.len() < MAX_EXCERPTS_PER_RULE {
                    excerpts.push(excerpt_around(&text.original, m.start(), m.end()));
                }
            }
            (count, excerpts)
        }
        CompiledMatcher::Structural(marker) => {
            if structural::marker_applies(*marker, &text.original) {
                (1, vec![structural::describe(*marker).to_string()])
            } else {
                (0, Vec::new())
            }
        }
    };

    if occurrences == 0 {
        return None;
    }
    Some(EvidenceMatch {
        pattern_id: pattern_id.to_string(),
        rule_id: compiled.rule.id.clone(),
        excerpts,
        occurrences,
        weight: compiled.rule.weight,
        polarity: compiled.rule.polarity,
        source: EvidenceSource::Local,
    })
}

fn match_keywords(lowered: &str, phrases: &[String]) -> (usize, Vec<String>) {
    let mut count = 0;
    let mut excerpts = Vec::new();
    for phrase in phrases {
        for start in phrase_occurrences(lowered, phrase) {
            count += 1;
            if excerpts.len() < MAX_EXCERPTS_PER_RULE {
                excerpts.push(excerpt_around(lowered, start, start + phrase.len()));
            }
        }
    }
    (count, excerpts)
}

/// Byte offsets of word-bounded, non-overlapping occurrences of a
/// phrase. A bare substring hit inside a longer word does not count
/// ("poc" never matches "epoch").
fn phrase_occurrences(haystack: &str, phrase: &str) -> Vec<usize> {
    if phrase.is_empty() {
        return Vec::new();
    }
    let mut positions = Vec::new();
    let mut from = 0;
    while let Some(found) = haystack[from..].find(phrase) {
        let start = from + found;
        let end = start + phrase.len();
        if word_bounded(haystack, start, end) {
            positions.push(start);
            from = end;
        } else {
            from = start + phrase.chars().next().map_or(1, char::len_utf8);
        }
    }
    positions
}

fn word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = start == 0
        || text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_alphanumeric());
    let after_ok = end == text.len()
        || text[end..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Widen a matched span by a little surrounding context, snapped to
/// char boundaries, with whitespace collapsed so excerpts render on
/// one line.
fn excerpt_around(text: &str, start: usize, end: usize) -> String {
    let from = floor_boundary(text, start.saturating_sub(EXCERPT_CONTEXT));
    let to = ceil_boundary(text, (end + EXCERPT_CONTEXT).min(text.len()));
    let window = text[from..to].trim();
    let mut out = window.split_whitespace().collect::<Vec<_>>().join(" ");
    if from > 0 {
        out.insert_str(0, "…");
    }
    if to < text.len() {
        out.push('…');
    }
    out
}

fn floor_boundary(text: &str, mut i: usize) -> usize {
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
