//! Evidence extraction: scans normalized input text against the
//! pattern library and produces raw signal matches per pattern.
//!
//! Extraction is deterministic: identical text and identical active
//! pattern set always yield identical matches. No randomness, no I/O.

mod extractor;
mod normalize;
mod structural;

pub use extractor::extract;
pub use normalize::{normalize, NormalizedText};
pub use structural::MIN_DOCUMENT_LEN;
