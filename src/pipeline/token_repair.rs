//! Re-insertion of whitespace lost during recognition.
//!
//! Dense renderings often fuse adjacent name tokens into one long word
//! ("JOAOSILVA"). Repair walks every word of the transcript and, for long
//! all-uppercase alphabetic tokens, tries to split them back into known
//! Brazilian first names and surnames from a reference vocabulary. Splitting
//! only ever inserts spaces; no character of the input is removed or changed.

use std::collections::HashSet;

/// Reference vocabulary of common Brazilian first names and surnames,
/// uppercase. Ordered roughly by frequency so the first embedded match wins
/// deterministically.
pub const DEFAULT_NAME_VOCABULARY: &[&str] = &[
    // first names, male
    "ANTONIO", "JOSE", "FRANCISCO", "CARLOS", "PAULO", "PEDRO", "LUCAS", "LUIZ", "MARCOS",
    "LUIS", "JOAO", "RICARDO", "BRUNO", "DANIEL", "EDUARDO", "RAFAEL", "FELIPE", "FABIO",
    "ANDRE", "JORGE", "DIEGO", "GUSTAVO", "FERNANDO", "RODRIGO", "LEANDRO", "TIAGO",
    "SERGIO", "ADRIANO", "ALEXANDRE",
    // first names, female
    "MARIA", "ANA", "FRANCISCA", "ANTONIA", "ADRIANA", "JULIANA", "MARCIA", "FERNANDA",
    "PATRICIA", "ALINE", "SANDRA", "CAMILA", "AMANDA", "BRUNA", "JESSICA", "LETICIA",
    "JULIA", "LUCIANA", "DENISE", "CARLA", "BEATRIZ", "CRISTINA", "MONICA", "SABRINA",
    "CAROLINA", "GABRIELA", "LARISSA", "NATALIA",
    // surnames
    "SILVA", "SANTOS", "OLIVEIRA", "SOUZA", "RODRIGUES", "FERREIRA", "ALVES", "PEREIRA",
    "LIMA", "GOMES", "COSTA", "RIBEIRO", "MARTINS", "CARVALHO", "ALMEIDA", "LOPES",
    "SOARES", "FERNANDES", "VIEIRA", "BARBOSA", "ROCHA", "DIAS", "MONTEIRO", "MENDES",
    "RAMOS", "MOREIRA", "ARAUJO", "MARIANO", "NUNES", "PETRAROLLI", "TASSINARI",
    // generational suffixes
    "NETO", "JUNIOR", "FILHO",
];

/// Repair fused name tokens in a transcript.
///
/// Line and word structure is preserved; only qualifying words (8+ chars,
/// all uppercase alphabetic) are candidates for splitting.
pub fn repair_concatenated_names(text: &str, vocab: &[String]) -> String {
    let ordered: Vec<String> = vocab.iter().map(|v| v.to_uppercase()).collect();
    let known: HashSet<&str> = ordered.iter().map(|s| s.as_str()).collect();

    text.lines()
        .map(|line| {
            line.split(' ')
                .map(|word| repair_token(word, &ordered, &known))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_candidate(word: &str) -> bool {
    word.chars().count() >= 8 && word.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
}

fn repair_token(word: &str, ordered: &[String], known: &HashSet<&str>) -> String {
    if !is_candidate(word) {
        return word.to_string();
    }
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();

    // Embedded known name with plausible text on both sides.
    for name in ordered {
        if name.chars().count() < 4 {
            continue;
        }
        if let Some(byte_idx) = word.find(name.as_str()) {
            let prefix = &word[..byte_idx];
            let suffix = &word[byte_idx + name.len()..];
            if prefix.chars().count() >= 3 && suffix.chars().count() >= 2 {
                return format!(
                    "{} {} {}",
                    repair_token(prefix, ordered, known),
                    name,
                    repair_token(suffix, ordered, known)
                );
            }
        }
    }

    // Two known names fused with nothing else around them.
    for i in 4..=n.saturating_sub(4) {
        let left: String = chars[..i].iter().collect();
        let right: String = chars[i..].iter().collect();
        if known.contains(left.as_str()) && known.contains(right.as_str()) {
            return format!("{left} {right}");
        }
    }

    // Very long words: best three-way split scored by vocabulary hits plus
    // size plausibility. Any positive score qualifies; vocabulary hits only
    // steer the choice between splits.
    if n > 12 {
        if let Some(split) = best_three_way_split(&chars, known) {
            return split;
        }
        // No split scored at all; fall back to a vowel boundary near the
        // middle so downstream extractors at least see two tokens.
        if n > 15 {
            if let Some(split) = vowel_fallback_split(&chars) {
                return split;
            }
        }
    }

    word.to_string()
}

fn best_three_way_split(chars: &[char], known: &HashSet<&str>) -> Option<String> {
    let n = chars.len();
    let mut best: Option<(i32, String)> = None;

    for i in 3..n.saturating_sub(2) {
        for j in (i + 3)..n.saturating_sub(1) {
            let p1: String = chars[..i].iter().collect();
            let p2: String = chars[i..j].iter().collect();
            let p3: String = chars[j..].iter().collect();

            let mut score = 0i32;
            for part in [&p1, &p2, &p3] {
                if known.contains(part.as_str()) {
                    score += 3;
                }
            }
            if (3..=10).contains(&p1.chars().count()) {
                score += 1;
            }
            if (3..=10).contains(&p2.chars().count()) {
                score += 1;
            }
            if (2..=10).contains(&p3.chars().count()) {
                score += 1;
            }

            if score > 0 && best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, format!("{p1} {p2} {p3}")));
            }
        }
    }

    best.map(|(_, s)| s)
}

fn vowel_fallback_split(chars: &[char]) -> Option<String> {
    let n = chars.len();
    let mid = n / 2;
    for offset in [0i32, -1, 1, -2, 2] {
        let idx = (mid as i32 + offset) as usize;
        if idx < 3 || idx >= n - 2 {
            continue;
        }
        if matches!(chars[idx], 'A' | 'E' | 'I' | 'O' | 'U') {
            let left: String = chars[..idx].iter().collect();
            let right: String = chars[idx..].iter().collect();
            return Some(format!("{left} {right}"));
        }
    }
    None
}
