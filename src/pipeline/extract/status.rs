//! Status, card number, kind, sectional, and subsection extraction.

use std::sync::LazyLock;

use regex::Regex;

static STATUS_REGULAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SITUA[CÇ][AÃ]O\s+REGULAR").unwrap());

static STATUS_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)SITUA[CÇ][AÃ]O[:\s]+([A-Za-záéíóúàèìòùâêîôûãõçñÁÉÍÓÚÀÈÌÒÙÂÊÎÔÛÃÕÇÑ\s]+)")
        .unwrap()
});

static STATUS_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(ATIVO|ATIVA|LICENCIADO|LICENCIADA)\b").unwrap());

static REGULAR_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bREGULAR\b").unwrap());

/// Extract the registration status, canonicalized. "SITUAÇÃO REGULAR" is by
/// far the common case and is recognized even when the label is damaged.
pub fn extract_status(text: &str) -> String {
    if STATUS_REGULAR.is_match(text) {
        return "SITUAÇÃO REGULAR".to_string();
    }
    if let Some(caps) = STATUS_LABELLED.captures(text) {
        if let Some(m) = caps.get(1) {
            let value = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            let upper = value.to_uppercase();
            if upper.contains("REGULAR") {
                return "SITUAÇÃO REGULAR".to_string();
            }
            if upper.contains("ATIVO") || upper.contains("ATIVA") {
                return "ATIVO".to_string();
            }
            if upper.contains("LICENCIAD") {
                return "LICENCIADO".to_string();
            }
            let count = upper.chars().count();
            if (4..=30).contains(&count) {
                return upper;
            }
        }
    }
    if let Some(caps) = STATUS_BARE.captures(text) {
        let upper = caps[1].to_uppercase();
        if upper.starts_with("LICENCIAD") {
            return "LICENCIADO".to_string();
        }
        return "ATIVO".to_string();
    }
    if REGULAR_BARE.is_match(text) {
        return "SITUAÇÃO REGULAR".to_string();
    }
    String::new()
}

static CARD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Inscri[cç][aã]o[:\s]*(\d{4,8})").unwrap(),
        Regex::new(r"(?i)N[uú]mero[:\s]*(\d{4,8})").unwrap(),
    ]
});

/// Verify the card number against the rendering: a labelled number wins, then
/// the queried number appearing verbatim, then the queried number itself.
/// The returned value is always in canonical form (leading zeros stripped).
pub fn extract_card_number(text: &str, queried: &str) -> String {
    for pattern in CARD_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return strip_leading_zeros(m.as_str());
            }
        }
    }
    if !queried.is_empty() && text.contains(queried) {
        return strip_leading_zeros(queried);
    }
    strip_leading_zeros(queried)
}

fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        if digits.is_empty() {
            String::new()
        } else {
            "0".to_string()
        }
    } else {
        stripped.to_string()
    }
}

static KIND_LABELLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Tipo[:\s]*([A-Za-z ]{5,30})").unwrap());

static KIND_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(ADVOGADO|ADVOGADA)\b").unwrap());

/// Extract the registration kind ("ADVOGADO"/"ADVOGADA" or a labelled value).
pub fn extract_kind(text: &str) -> String {
    if let Some(caps) = KIND_LABELLED.captures(text) {
        if let Some(m) = caps.get(1) {
            let value = m.as_str().trim();
            if value.chars().count() > 3 {
                return value.to_uppercase();
            }
        }
    }
    if let Some(caps) = KIND_BARE.captures(text) {
        return caps[1].to_uppercase();
    }
    String::new()
}

static SECCIONAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Seccional[:\s]*([A-Za-z]{2})\b").unwrap(),
        Regex::new(r"(?i)\bUF[:\s]*([A-Za-z]{2})\b").unwrap(),
    ]
});

/// Extract the sectional (state) code, defaulting to the queried one.
pub fn extract_seccional(text: &str, queried_uf: &str) -> String {
    for pattern in SECCIONAL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return m.as_str().to_uppercase();
            }
        }
    }
    queried_uf.to_uppercase()
}

static SUBSECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Subse[cç][aã]o[:\s]*([A-Za-záéíóúàèìòùâêîôûãõçñÁÉÍÓÚÀÈÌÒÙÂÊÎÔÛÃÕÇÑ\s]+?)(?:\n|$)",
    )
    .unwrap()
});

const SUBSECTION_DENYLIST: &[&str] = &["TELEFONE", "EMAIL", "ENDERECO", "SITUACAO"];

/// Extract the subsection name (e.g. "SAO PAULO"), empty when absent.
pub fn extract_subsection(text: &str) -> String {
    if let Some(caps) = SUBSECTION_PATTERN.captures(text) {
        if let Some(m) = caps.get(1) {
            let value = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            let count = value.chars().count();
            let upper = value.to_uppercase();
            if (5..=50).contains(&count)
                && !SUBSECTION_DENYLIST.iter().any(|w| upper.contains(w))
            {
                return value;
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_status_is_canonical() {
        assert_eq!(extract_status("Situacao Regular"), "SITUAÇÃO REGULAR");
        assert_eq!(extract_status("SITUAÇÃO REGULAR"), "SITUAÇÃO REGULAR");
        assert_eq!(extract_status("tudo regular por aqui"), "SITUAÇÃO REGULAR");
    }

    #[test]
    fn labelled_status_is_canonicalized() {
        assert_eq!(extract_status("Situação: Ativo"), "ATIVO");
        assert_eq!(extract_status("SITUACAO: LICENCIADA"), "LICENCIADO");
        assert_eq!(extract_status("Situacao: Suspenso"), "SUSPENSO");
    }

    #[test]
    fn bare_status_words_are_found() {
        assert_eq!(extract_status("profissional ativo na base"), "ATIVO");
        assert_eq!(extract_status("nada aqui"), "");
    }

    #[test]
    fn labelled_card_number_wins_and_is_canonical() {
        assert_eq!(extract_card_number("Inscricao: 0123456", "999"), "123456");
        assert_eq!(extract_card_number("Número: 38822", "999"), "38822");
    }

    #[test]
    fn queried_number_is_fallback() {
        assert_eq!(extract_card_number("texto com 388221 dentro", "388221"), "388221");
        assert_eq!(extract_card_number("nada", "0041"), "41");
        assert_eq!(extract_card_number("nada", "0000"), "0");
    }

    #[test]
    fn kind_extraction() {
        assert_eq!(extract_kind("Tipo: Advogado Regular"), "ADVOGADO REGULAR");
        assert_eq!(extract_kind("ADVOGADA desde 2001"), "ADVOGADA");
        assert_eq!(extract_kind("sem tipo"), "");
    }

    #[test]
    fn seccional_defaults_to_queried() {
        assert_eq!(extract_seccional("Seccional: sp", "RJ"), "SP");
        assert_eq!(extract_seccional("UF: mg", "RJ"), "MG");
        assert_eq!(extract_seccional("nada", "rj"), "RJ");
    }

    #[test]
    fn subsection_extraction() {
        assert_eq!(extract_subsection("Subseção: SAO PAULO\nmais"), "SAO PAULO");
        assert_eq!(extract_subsection("Subsecao: TELEFONE"), "");
        assert_eq!(extract_subsection("nada"), "");
    }
}
