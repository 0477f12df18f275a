//! Professional-address extraction and formatting.
//!
//! Addresses are the messiest field: the label often runs into the value,
//! phone numbers and status words bleed into the same line, and house/CEP
//! numbers lose their separators. Extraction grabs the widest plausible span,
//! strips the foreign fragments, then reformats separators.

use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Endere[cç]o\s+Profissional[:\s]*([^\n]+?)(?:Telefone|\n|$)").unwrap(),
        Regex::new(r"(?i)Endere[cç]o[:\s]*([^\n]+?)(?:Telefone|\n|$)").unwrap(),
        Regex::new(r"(?i)(RUA\s+[^,\n]+(?:,\s*N[°º]?\s*\d+)?[^,\n]*(?:,\s*[^,\n]+)*)").unwrap(),
        Regex::new(r"(?i)(AVENIDA\s+[^,\n]+(?:,\s*N[°º]?\s*\d+)?[^,\n]*(?:,\s*[^,\n]+)*)").unwrap(),
        Regex::new(r"(?i)(ALAMEDA\s+[^,\n]+(?:,\s*N[°º]?\s*\d+)?[^,\n]*(?:,\s*[^,\n]+)*)").unwrap(),
    ]
});

static PHONE_FRAGMENTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Telefone\s*Profissional[:\s]*\(?\d{2}\)?\s*\d{4,5}[-\s]?\d{4}").unwrap(),
        Regex::new(r"(?i)TelefoneProfissional[:\s]*\(?\d{2}\)?\s*\d{4,5}[-\s]?\d{4}").unwrap(),
        Regex::new(r"(?i)Telefone[:\s]*\(?\d{2}\)?\s*\d{4,5}[-\s]?\d{4}").unwrap(),
        Regex::new(r"\(\d{2}\)\s*\d{4,5}[-\s]?\d{4}").unwrap(),
        Regex::new(r"(?i)Telefone[:\s]*N[aã]o\s+informado").unwrap(),
    ]
});

static STATUS_FRAGMENTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i):?\s*SITUA[CÇ][AÃ]O\s+REGULAR:?").unwrap(),
        Regex::new(r"(?i):?\s*SITUA[CÇ][AÃ]O[:\s]*\w+").unwrap(),
        Regex::new(r"(?i)\bREGULAR\b:?").unwrap(),
    ]
});

static ADDRESS_MARKERS: &[&str] = &["RUA", "AVENIDA", "ALAMEDA", "CENTRO", "SP", "CEP"];

static NOT_INFORMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Endere[cç]o[:\s]*N[aã]o\s+informado").unwrap());

/// Extract and format the professional address, empty when no plausible span
/// is found.
pub fn extract_address(text: &str) -> String {
    for pattern in ADDRESS_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let stripped = strip_status(&strip_phones(m.as_str()));
                let formatted = format_address(&stripped);
                if is_plausible(&formatted) {
                    return formatted;
                }
            }
        }
    }
    if NOT_INFORMED.is_match(text) {
        return "Não informado".to_string();
    }
    String::new()
}

fn strip_phones(value: &str) -> String {
    let mut out = value.to_string();
    for pattern in PHONE_FRAGMENTS.iter() {
        out = pattern.replace_all(&out, " ").into_owned();
    }
    out
}

fn strip_status(value: &str) -> String {
    let mut out = value.to_string();
    for pattern in STATUS_FRAGMENTS.iter() {
        out = pattern.replace_all(&out, " ").into_owned();
    }
    out
}

fn is_plausible(value: &str) -> bool {
    let count = value.chars().count();
    if !(10..=200).contains(&count) {
        return false;
    }
    let upper = value.to_uppercase();
    ADDRESS_MARKERS.iter().any(|marker| upper.contains(marker))
}

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HOUSE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(N[°º]?\s*\d+)").unwrap());
static DOUBLE_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*,+\s*").unwrap());
static FUSED_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.N(\d+)").unwrap());
static FUSED_CEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{5})(\d{3})\b").unwrap());

fn format_address(value: &str) -> String {
    let mut out = MULTI_SPACE.replace_all(value, " ").into_owned();
    out = FUSED_NUMBER.replace_all(&out, ", N° $1").into_owned();
    out = HOUSE_NUMBER.replace_all(&out, ", $1, ").into_owned();
    out = DOUBLE_COMMA.replace_all(&out, ", ").into_owned();
    out = FUSED_CEP.replace_all(&out, "$1-$2").into_owned();
    out = MULTI_SPACE.replace_all(&out, " ").into_owned();
    out.trim().trim_matches(',').trim().to_string()
}
