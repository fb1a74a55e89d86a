//! Storage module - Object keys and object-storage uploads

pub mod object_store;

pub use object_store::ObjectStore;

/// Longest prompt-derived stem kept in an object key
pub const MAX_STEM_LEN: usize = 50;

/// Build an object key from a prompt and a millisecond timestamp.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the stem is cut to
/// [`MAX_STEM_LEN`] characters and `_<timestamp>` is appended, so keys never
/// need URL encoding.
pub fn object_key(prompt: &str, timestamp_ms: i64) -> String {
    let stem: String = prompt
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_STEM_LEN)
        .collect();
    format!("{}_{}", stem, timestamp_ms)
}
