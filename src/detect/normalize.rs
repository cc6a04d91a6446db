/// Input text prepared for signal evaluation.
///
/// Keyword rules match against `lowered` (lower-cased,
/// whitespace-collapsed). Regex and structural rules run on `original`
/// so code blocks, URLs, and proper nouns are not mangled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub original: String,
    pub lowered: String,
}

pub fn normalize(text: &str) -> NormalizedText {
    NormalizedText {
        original: text.to_string(),
        lowered: collapse_whitespace(&text.to_lowercase()),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
