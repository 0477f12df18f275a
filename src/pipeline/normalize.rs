//! Allowlist-based cleanup of raw recognition output.
//!
//! Recognition of low-quality renderings produces stray punctuation, control
//! characters, and runs of whitespace. Normalization keeps only characters
//! that can appear in a registration record and collapses the rest, line by
//! line, so downstream extractors see stable input. The operation is
//! idempotent: normalizing already-normalized text returns it unchanged.

/// Characters that survive normalization.
///
/// Alphanumerics (including accented letters), `_`, whitespace, and the
/// punctuation that legitimately occurs in record fields (labels, phone
/// numbers, addresses, dates).
pub(crate) fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || matches!(c, ':' | '(' | ')' | '[' | ']' | '.' | '-' | '/')
}

/// Clean a raw transcript: per line, replace disallowed characters with
/// spaces, collapse whitespace runs, and drop lines left with at most one
/// character.
pub fn clean_recognized_text(text: &str) -> String {
    let mut lines = Vec::new();
    for line in text.lines() {
        let replaced: String = line
            .chars()
            .map(|c| if is_allowed_char(c) { c } else { ' ' })
            .collect();
        let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() > 1 {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}
