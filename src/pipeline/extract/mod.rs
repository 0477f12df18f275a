//! Field extractors and record assembly.
//!
//! Each extractor is a pure function over cleaned text. The assembler merges
//! extractor output into a [`LawyerRecord`] with fixed precedence: a longer
//! candidate wins for the name (more recovered characters means a better
//! read), every other field keeps the first non-empty value it got.

pub mod address;
pub mod contact;
pub mod name;
pub mod status;

pub use address::extract_address;
pub use contact::{extract_email, extract_phones, extract_registration_date};
pub use name::{clean_name, contains_attorney_word, extract_name, extract_name_from_page};
pub use status::{
    extract_card_number, extract_kind, extract_seccional, extract_status, extract_subsection,
};

use tracing::debug;

use crate::config::LookupConfig;
use crate::models::LawyerRecord;
use crate::pipeline::token_repair::repair_concatenated_names;

/// Merge fields recognized from a card rendering into the record.
///
/// The detail text carries the richest field set; it is token-repaired first
/// and kept verbatim in `raw_detail` for auditing.
pub fn apply_detail_text(record: &mut LawyerRecord, detail_text: &str, config: &LookupConfig) {
    let repaired = repair_concatenated_names(detail_text, &config.name_vocabulary);
    record.raw_detail = repaired.clone();

    let name = extract_name(&repaired);
    if name.chars().count() > record.name.chars().count() {
        debug!(name = %name, "detail name replaces shorter candidate");
        record.name = name;
    }

    record.card_number = extract_card_number(&repaired, &record.number);

    if record.phone.is_empty() {
        record.phone = extract_phones(&repaired);
    }
    if record.address.is_empty() {
        record.address = extract_address(&repaired);
    }
    if record.status.is_empty() {
        record.status = extract_status(&repaired);
    }
    if record.email.is_empty() {
        record.email = extract_email(&repaired);
    }
    if record.registration_date.is_empty() {
        record.registration_date = extract_registration_date(&repaired);
    }

    // Seccional and subsection ride along in the address field; with no
    // address they stand alone rather than being dropped.
    let seccional = extract_seccional(&repaired, &record.uf);
    if seccional != record.uf {
        record.address = if record.address.is_empty() {
            format!("Seccional: {seccional}")
        } else {
            format!("Seccional: {seccional} | {}", record.address)
        };
    }
    let subsection = extract_subsection(&repaired);
    if !subsection.is_empty() {
        record.address = if record.address.is_empty() {
            format!("Subseção: {subsection}")
        } else {
            format!("{} | Subseção: {subsection}", record.address)
        };
    }
}

/// Merge fields found in the result-page text into the record. Page text is
/// sparser than the card but sometimes carries fields the rendering lost.
pub fn apply_page_text(record: &mut LawyerRecord, page_text: &str) {
    let name = extract_name_from_page(page_text);
    if name.chars().count() > record.name.chars().count() {
        record.name = name;
    }
    if record.kind.is_empty() {
        record.kind = extract_kind(page_text);
    }
    if record.status.is_empty() {
        record.status = extract_status(page_text);
    }
    if record.phone.is_empty() {
        record.phone = extract_phones(page_text);
    }
    if record.address.is_empty() {
        record.address = extract_address(page_text);
    }
}
