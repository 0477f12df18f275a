//! Phone, e-mail, and registration-date extraction.

use std::sync::LazyLock;

use regex::Regex;

static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Telefone\s*Profissional[:\s]*\((\d{2})\)\s*(\d{4,5})[-\s]?(\d{4})")
            .unwrap(),
        // Recognition sometimes fuses the label words.
        Regex::new(r"(?i)TelefoneProfissional[:\s]*\((\d{2})\)\s*(\d{4,5})[-\s]?(\d{4})").unwrap(),
        Regex::new(r"(?i)Telefone[:\s]*\((\d{2})\)\s*(\d{4,5})[-\s]?(\d{4})").unwrap(),
        Regex::new(r"\((\d{2})\)\s*(\d{4,5})[-\s]?(\d{4})").unwrap(),
        Regex::new(r"\b(\d{2})\s+(\d{4,5})[-\s]?(\d{4})\b").unwrap(),
    ]
});

static PHONE_NOT_INFORMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Telefone[:\s]*N[aã]o\s+informado").unwrap());

static EMAIL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)E-?mail[:\s]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})").unwrap(),
        Regex::new(r"([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})").unwrap(),
    ]
});

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Data[:\s]*(?:de\s+)?Inscri[cç][aã]o[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{4})")
            .unwrap(),
        Regex::new(r"(?i)Inscrito\s+em[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{4})").unwrap(),
        Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{4})").unwrap(),
    ]
});

/// Extract every distinct phone number, formatted "(DD) NNNNN-NNNN", joined
/// with " | ". Returns the literal "Não informado" when the card explicitly
/// says so, empty when nothing is found.
pub fn extract_phones(text: &str) -> String {
    let mut found: Vec<String> = Vec::new();
    for pattern in PHONE_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let formatted = format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]);
            if !found.contains(&formatted) {
                found.push(formatted);
            }
        }
    }
    if found.is_empty() {
        if PHONE_NOT_INFORMED.is_match(text) {
            return "Não informado".to_string();
        }
        return String::new();
    }
    found.join(" | ")
}

/// Extract an e-mail address, lowercased. Labelled occurrences win over bare
/// ones.
pub fn extract_email(text: &str) -> String {
    for pattern in EMAIL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let email = m.as_str().to_lowercase();
                let count = email.chars().count();
                if (5..=100).contains(&count) && !email.contains(char::is_whitespace) {
                    return email;
                }
            }
        }
    }
    String::new()
}

/// Extract the registration date (dd/mm/yyyy or dd-mm-yyyy).
pub fn extract_registration_date(text: &str) -> String {
    for pattern in DATE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return m.as_str().to_string();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_labelled_professional_phone() {
        let text = "Telefone Profissional: (11) 98765-4321";
        assert_eq!(extract_phones(text), "(11) 98765-4321");
    }

    #[test]
    fn extracts_fused_label_and_bare_numbers() {
        assert_eq!(
            extract_phones("TelefoneProfissional: (11) 3210-9876"),
            "(11) 3210-9876"
        );
        assert_eq!(extract_phones("fale conosco (21) 99888-7766"), "(21) 99888-7766");
        assert_eq!(extract_phones("contato 11 98765 4321 fim"), "(11) 98765-4321");
    }

    #[test]
    fn deduplicates_and_joins_multiple_phones() {
        let text = "Telefone: (11) 98765-4321\nTelefone Profissional: (11) 98765-4321\n(11) 3210-9876";
        assert_eq!(extract_phones(text), "(11) 98765-4321 | (11) 3210-9876");
    }

    #[test]
    fn reports_explicitly_missing_phone() {
        assert_eq!(extract_phones("Telefone: Não informado"), "Não informado");
        assert_eq!(extract_phones("Telefone: Nao informado"), "Não informado");
        assert_eq!(extract_phones("sem contato"), "");
    }

    #[test]
    fn extracts_and_lowercases_email() {
        assert_eq!(
            extract_email("E-mail: Joao.Silva@Exemplo.com.BR"),
            "joao.silva@exemplo.com.br"
        );
        assert_eq!(extract_email("contato em maria@adv.br hoje"), "maria@adv.br");
        assert_eq!(extract_email("sem email aqui"), "");
    }

    #[test]
    fn extracts_registration_date() {
        assert_eq!(
            extract_registration_date("Data de Inscrição: 15/03/2010"),
            "15/03/2010"
        );
        assert_eq!(extract_registration_date("Inscrito em 1-2-1999"), "1-2-1999");
        assert_eq!(extract_registration_date("em 15/03/2010 na capital"), "15/03/2010");
        assert_eq!(extract_registration_date("sem data"), "");
    }
}
