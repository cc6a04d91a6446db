//! Structural marker evaluation.
//!
//! Structural signals fire on what a document *lacks*, so they only
//! apply above a minimum length; a one-line issue is not penalized for
//! missing a test-plan section.

use crate::patterns::StructuralMarker;
use once_cell::sync::Lazy;
use regex::Regex;

/// Documents shorter than this never trigger structural markers.
pub const MIN_DOCUMENT_LEN: usize = 280;

static TEST_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^#{1,6}\s*(?:test|testing|validation|verification)\b").unwrap()
});

static TEST_PLAN_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:test plan|testing strategy|validation plan|verified by)\b").unwrap()
});

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").unwrap());

static DOCS_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:docs|documentation|readme|reference guide)\b").unwrap());

pub(crate) fn marker_applies(marker: StructuralMarker, original: &str) -> bool {
    if original.len() < MIN_DOCUMENT_LEN {
        return false;
    }
    match marker {
        StructuralMarker::MissingTestPlan => {
            !TEST_SECTION.is_match(original) && !TEST_PLAN_PHRASE.is_match(original)
        }
        StructuralMarker::MissingResearchReference => {
            !URL.is_match(original) && !DOCS_MENTION.is_match(original)
        }
    }
}

pub(crate) fn describe(marker: StructuralMarker) -> &'static str {
    match marker {
        StructuralMarker::MissingTestPlan => "no test plan or validation section present",
        StructuralMarker::MissingResearchReference => {
            "no documentation reference or link present"
        }
    }
}
