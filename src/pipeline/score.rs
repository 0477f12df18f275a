//! Quality scoring of recognition candidates.
//!
//! Pure heuristic over the cleaned transcript: length, domain keywords,
//! digit runs, and line structure raise the score; a high ratio of characters
//! outside the normalization allowlist lowers it. The multiplexer uses the
//! score both to rank candidates and to short-circuit once one is good
//! enough.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::is_allowed_char;

/// Keyword stems rewarded by the scorer. Stems, not full words, so accent
/// and suffix variations in the transcript still match.
pub const DEFAULT_SCORE_KEYWORDS: &[&str] = &[
    "ADVOGAD",
    "INSCRI",
    "SECCIONAL",
    "SITUA",
    "REGULAR",
    "ENDERECO",
    "TELEFONE",
    "PROFISSIONAL",
];

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3,}").unwrap());

/// Score a cleaned transcript on a 0–100 scale.
///
/// Deterministic and side-effect free. Texts under 10 characters score 0
/// outright.
pub fn score_text(text: &str, keywords: &[String]) -> u8 {
    let char_count = text.chars().count();
    if char_count < 10 {
        return 0;
    }

    let mut score: i32 = 0;

    if char_count >= 50 {
        score += 20;
    } else if char_count >= 30 {
        score += 10;
    }

    let upper = text.to_uppercase();
    for keyword in keywords {
        if upper.contains(&keyword.to_uppercase()) {
            score += 8;
        }
    }

    if DIGIT_RUN.is_match(text) {
        score += 15;
    }

    if text.lines().filter(|l| !l.trim().is_empty()).count() >= 5 {
        score += 10;
    }

    let strange = text.chars().filter(|&c| !is_allowed_char(c)).count();
    if strange * 10 > char_count {
        score -= 20;
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        DEFAULT_SCORE_KEYWORDS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_text_scores_zero() {
        assert_eq!(score_text("", &keywords()), 0);
        assert_eq!(score_text("abc 123", &keywords()), 0);
    }

    #[test]
    fn keywords_are_monotonic() {
        let base = "texto de preenchimento sem nada de interessante aqui";
        let with_kw = format!("{base} ADVOGADO INSCRICAO");
        assert!(score_text(&with_kw, &keywords()) >= score_text(base, &keywords()));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let lower = "advogado inscricao seccional e mais texto aqui";
        let upper = lower.to_uppercase();
        assert_eq!(score_text(lower, &keywords()), score_text(&upper, &keywords()));
    }

    #[test]
    fn structure_bonuses_apply() {
        let flat = "uma linha apenas mas longa o bastante para contar";
        let lined = "linha um aqui\nlinha dois aqui\nlinha tres aqui\nlinha quatro aqui\nlinha cinco aqui";
        assert!(score_text(lined, &keywords()) > 0);
        let with_digits = format!("{flat} 123456");
        assert!(score_text(&with_digits, &keywords()) > score_text(flat, &keywords()));
    }

    #[test]
    fn strange_characters_penalize() {
        let clean = "ADVOGADO INSCRICAO SECCIONAL 123456 texto limpo aqui";
        let noisy = "ADVOGADO INSCRICAO SECCIONAL 123456 @#$%&*!@#$%&*!@#$%";
        assert!(score_text(noisy, &keywords()) < score_text(clean, &keywords()));
    }

    #[test]
    fn score_never_exceeds_100() {
        let loaded = "ADVOGADO INSCRICAO SECCIONAL SITUACAO REGULAR ENDERECO TELEFONE PROFISSIONAL 123456\n\
                      linha dois\nlinha tres\nlinha quatro\nlinha cinco\nlinha seis";
        assert!(score_text(loaded, &keywords()) <= 100);
    }
}
