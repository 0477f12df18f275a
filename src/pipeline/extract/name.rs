//! Name extraction and validation.

use std::sync::LazyLock;

use regex::Regex;

/// Upper-case letter class including Portuguese accented letters.
const UPPER: &str = "A-ZÁÉÍÓÚÀÈÌÒÙÂÊÎÔÛÃÕÇÑ";
const LETTER: &str = "A-Za-záéíóúàèìòùâêîôûãõçñÁÉÍÓÚÀÈÌÒÙÂÊÎÔÛÃÕÇÑ";

static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Full-line name starting with an uppercase letter.
        Regex::new(&format!(r"^([{UPPER}][{LETTER}\s]{{8,60}})$")).unwrap(),
        // Labelled name.
        Regex::new(&format!(r"Nome[:\s]*([{LETTER}\s]{{5,60}})")).unwrap(),
        // Run of 2+ all-uppercase words.
        Regex::new(&format!(r"([{UPPER}]{{2,}}(?:\s+[{UPPER}]{{2,}})+)")).unwrap(),
    ]
});

static PAGE_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(&format!(r"(?i)Nome[:\s]+([{LETTER}\s]{{5,60}})")).unwrap(),
        Regex::new(&format!(r"([{UPPER}]{{2,}}(?:\s+[{UPPER}]{{2,}}){{1,5}})")).unwrap(),
    ]
});

/// Labels that show up near the top of a card and must not be mistaken for a
/// person's name.
const NAME_DENYLIST: &[&str] = &[
    "INSCRICAO",
    "SECCIONAL",
    "TELEFONE",
    "ENDERECO",
    "ADVOGADO",
    "SITUACAO",
];

const ATTORNEY_WORDS: &[&str] = &[
    "ADVOGADO", "ADVOGADA", "ADVOGADOS", "ADVOGADAS", "ADV.", "ADV", "ADVOG.", "ADVOG",
    "ADVOGAD", "ADVOCAC", "ADVOCACIA",
];

/// The name sits in the first lines of the card. First pattern match that
/// validates wins.
pub fn extract_name(text: &str) -> String {
    for line in text.lines().take(5) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for pattern in NAME_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(line) {
                if let Some(m) = caps.get(1) {
                    let candidate = m.as_str().trim();
                    if is_valid_name(candidate) {
                        return candidate.to_string();
                    }
                }
            }
        }
    }
    String::new()
}

/// Name extraction over result-page text, which carries more surrounding
/// prose than a card; searches a wider window and prefers labelled matches.
pub fn extract_name_from_page(text: &str) -> String {
    for line in text.lines().take(10) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for pattern in PAGE_NAME_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(line) {
                if let Some(m) = caps.get(1) {
                    let candidate = m.as_str().trim();
                    if is_valid_name(candidate) {
                        return candidate.to_string();
                    }
                }
            }
        }
    }
    String::new()
}

fn is_valid_name(candidate: &str) -> bool {
    let count = candidate.chars().count();
    if !(8..=60).contains(&count) {
        return false;
    }
    if !candidate.contains(' ') || candidate.split_whitespace().count() < 2 {
        return false;
    }
    let upper = candidate.to_uppercase();
    if NAME_DENYLIST.iter().any(|word| upper.contains(word)) {
        return false;
    }
    candidate.chars().all(|c| c.is_alphabetic() || c == ' ')
}

/// Final cleanup of an assembled name. Returns an empty string when the value
/// cannot be a person's name.
pub fn clean_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let count = collapsed.chars().count();
    if !(5..=100).contains(&count) {
        return String::new();
    }
    if !collapsed.contains(' ') {
        return String::new();
    }
    if collapsed.chars().any(|c| c.is_ascii_digit()) {
        return String::new();
    }
    let upper = collapsed.to_uppercase();
    if ["ERRO", "INVALID", "NULL", "NONE"].iter().any(|w| upper.contains(w)) {
        return String::new();
    }
    if contains_attorney_word(&collapsed) {
        return String::new();
    }
    collapsed
}

/// True when the value contains professional-title words rather than a name.
/// Used by the plausibility check: a "name" reading as the word for the
/// profession itself means the recognizer picked up the wrong region.
pub fn contains_attorney_word(value: &str) -> bool {
    let upper = value.to_uppercase();
    ATTORNEY_WORDS.iter().any(|word| upper.contains(word))
}
