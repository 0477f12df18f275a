//! Canonical lookup identifiers.
//!
//! The same registration arrives spelled many ways: "41"/"0041", "sp"/"SP",
//! with or without surrounding whitespace, or fused as "SP388221".
//! Canonicalization strips leading zeros from the number and uppercases the
//! sectional, so every spelling maps to the same cache key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The 27 Brazilian state (sectional) codes.
pub const VALID_UFS: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// A registration identifier as queried: number plus sectional code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupId {
    number: String,
    uf: String,
}

impl LookupId {
    pub fn new(number: &str, uf: &str) -> Self {
        Self {
            number: number.trim().to_string(),
            uf: uf.trim().to_string(),
        }
    }

    /// Canonical (number, uf) pair: digits with leading zeros stripped
    /// (all-zero collapses to "0"), uppercase sectional.
    pub fn normalized(&self) -> (String, String) {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let stripped = digits.trim_start_matches('0');
        let number = if stripped.is_empty() {
            if digits.is_empty() {
                String::new()
            } else {
                "0".to_string()
            }
        } else {
            stripped.to_string()
        };
        (number, self.uf.to_uppercase())
    }

    /// Cache key shared by every spelling of this identifier.
    pub fn cache_key(&self) -> String {
        let (number, uf) = self.normalized();
        format!("{number}/{uf}")
    }

    /// Parse a fused spelling like "SP388221" (sectional prefix followed by
    /// 4–8 digits). Rejects unknown sectionals, malformed digit runs, and
    /// all-zero numbers.
    pub fn parse_compact(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().to_uppercase();
        if cleaned.chars().count() < 6 {
            return None;
        }
        let uf: String = cleaned.chars().take(2).collect();
        if !VALID_UFS.contains(&uf.as_str()) {
            return None;
        }
        let digits: String = cleaned.chars().skip(2).collect();
        let len = digits.chars().count();
        if !(4..=8).contains(&len) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let stripped = digits.trim_start_matches('0');
        if stripped.is_empty() {
            return None;
        }
        Some(Self::new(stripped, &uf))
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn uf(&self) -> &str {
        &self.uf
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.uf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosmetic_spellings_share_a_key() {
        let spellings = [
            LookupId::new("388221", "SP"),
            LookupId::new("0388221", "sp"),
            LookupId::new(" 388221 ", " Sp "),
            LookupId::new("00388221", "SP"),
        ];
        let keys: Vec<_> = spellings.iter().map(|id| id.cache_key()).collect();
        assert!(keys.iter().all(|k| k == "388221/SP"));
    }

    #[test]
    fn all_zero_number_collapses_to_zero() {
        assert_eq!(LookupId::new("0000", "sp").cache_key(), "0/SP");
    }

    #[test]
    fn normalization_is_idempotent() {
        let id = LookupId::new("0041", "sp");
        let (number, uf) = id.normalized();
        let again = LookupId::new(&number, &uf);
        assert_eq!(again.normalized(), (number, uf));
    }

    #[test]
    fn parse_compact_accepts_fused_spelling() {
        let id = LookupId::parse_compact("SP388221").unwrap();
        assert_eq!(id.cache_key(), "388221/SP");
        let id = LookupId::parse_compact(" sp0388221 ").unwrap();
        assert_eq!(id.cache_key(), "388221/SP");
    }

    #[test]
    fn parse_compact_rejects_malformed_spellings() {
        assert!(LookupId::parse_compact("M356437").is_none()); // bad sectional
        assert!(LookupId::parse_compact("SP12").is_none()); // too short
        assert!(LookupId::parse_compact("XX388221").is_none()); // unknown code
        assert!(LookupId::parse_compact("SP38A221").is_none()); // non-digit
        assert!(LookupId::parse_compact("SP0000").is_none()); // all zeros
        assert!(LookupId::parse_compact("SP123456789").is_none()); // too long
    }
}
