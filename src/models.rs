//! Record types shared between the pipeline and the cache.

use serde::{Deserialize, Serialize};

/// Structured result of one registration lookup.
///
/// Filled progressively: basic fields come from the result page, detail fields
/// from the recognized card rendering. Merge precedence is longer-wins for the
/// name and first-non-empty-wins for every other field (see
/// [`crate::pipeline::extract`]). Treated as immutable once returned to the
/// caller; failed lookups carry `success = false` and a machine-usable
/// `error` reason from the fixed set in [`crate::lookup::LookupFailure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawyerRecord {
    /// Queried registration number, normalized (leading zeros stripped).
    pub number: String,
    /// Queried sectional (two-letter state code), uppercase.
    pub uf: String,
    pub name: String,
    /// Registration kind, e.g. "ADVOGADO".
    pub kind: String,
    pub status: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub registration_date: String,
    /// Card number as verified against the rendering. Canonical form strips
    /// leading zeros, matching identifier normalization.
    pub card_number: String,
    /// Normalized text of the card rendering the detail fields came from.
    pub raw_detail: String,
    pub error: String,
    pub success: bool,
}

impl LawyerRecord {
    /// Empty record for a queried identifier.
    pub fn new(number: &str, uf: &str) -> Self {
        Self {
            number: number.to_string(),
            uf: uf.to_string(),
            ..Self::default()
        }
    }

    /// Failed record carrying a terminal error reason.
    pub fn failed(number: &str, uf: &str, reason: &str) -> Self {
        Self {
            number: number.to_string(),
            uf: uf.to_string(),
            error: reason.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty_and_unsuccessful() {
        let record = LawyerRecord::new("123456", "SP");
        assert_eq!(record.number, "123456");
        assert_eq!(record.uf, "SP");
        assert!(record.name.is_empty());
        assert!(!record.success);
    }

    #[test]
    fn failed_record_carries_reason() {
        let record = LawyerRecord::failed("123456", "SP", "not_found");
        assert_eq!(record.error, "not_found");
        assert!(!record.success);
    }

    #[test]
    fn serde_round_trip() {
        let mut record = LawyerRecord::new("123456", "SP");
        record.name = "JOAO SILVA SANTOS".to_string();
        record.success = true;
        let json = serde_json::to_string(&record).unwrap();
        let back: LawyerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
