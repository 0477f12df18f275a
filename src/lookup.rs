//! Batch lookup orchestration.
//!
//! [`LookupService`] drives one batch end to end: group the raw requests by
//! canonical identifier, answer each group from the cache when possible,
//! otherwise fetch the page, recognize the card rendering, assemble the
//! record, and fan the result back out to every originating request. Failed
//! lookups produce records too (with `success = false` and a machine reason),
//! and are cached like successes so a known-missing registration is not
//! re-fetched.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{dedup, LookupId, QueryCache};
use crate::config::LookupConfig;
use crate::models::LawyerRecord;
use crate::pipeline::extract::{
    apply_detail_text, apply_page_text, clean_name, contains_attorney_word,
};
use crate::pipeline::{recognize_bytes, EngineError, RecognitionEngine};

/// What the page-automation collaborator captured for one identifier.
pub struct PageCapture {
    /// Visible text of the result page.
    pub page_text: String,
    /// Encoded rendering of the detail card, when one was shown.
    pub detail_image: Option<Vec<u8>>,
}

/// Abstraction over the page-automation collaborator.
pub trait PageSource {
    fn fetch(&mut self, id: &LookupId) -> Result<PageCapture, EngineError>;
}

/// Terminal outcome of a failed lookup. `reason()` is the stable machine
/// string stored in [`LawyerRecord::error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    /// The registry reports no such registration. Terminal, never retried.
    #[error("registration not found")]
    NotFound,

    /// Recognition produced no usable text and the page carried no fields.
    #[error("no recognizable content")]
    NoRecognizableContent,

    /// The assembled record failed the plausibility check.
    #[error("implausible result")]
    ImplausibleResult,

    /// The page source faulted before a capture was obtained.
    #[error("upstream failure")]
    UpstreamFailure,
}

impl LookupFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::NoRecognizableContent => "no_recognizable_content",
            Self::ImplausibleResult => "implausible_result",
            Self::UpstreamFailure => "upstream_failure",
        }
    }
}

/// Result of one processed batch.
pub struct BatchOutcome<H> {
    /// One record per submitted request, in group-then-submission order.
    pub results: Vec<(H, LawyerRecord)>,
    /// Distinct identifiers that had to be fetched (cache misses).
    pub unique_fetches: usize,
    /// Requests answered by sharing another request's fetch.
    pub duplicates_avoided: u64,
}

/// Ties the cache and the recognition pipeline to a page source.
pub struct LookupService<'a, E: RecognitionEngine> {
    config: &'a LookupConfig,
    cache: &'a QueryCache,
    engine: &'a E,
}

/// Fragments of result-page text that mean "no such registration".
const NOT_FOUND_MARKERS: &[&str] = &[
    "não encontrado",
    "nenhum resultado",
    "não foi possível",
    "não localizado",
    "não existe",
    "inválida",
    "erro",
    "without results",
    "no results",
];

impl<'a, E: RecognitionEngine> LookupService<'a, E> {
    pub fn new(config: &'a LookupConfig, cache: &'a QueryCache, engine: &'a E) -> Self {
        Self { config, cache, engine }
    }

    /// Process a batch of raw requests. Each handle gets exactly one record;
    /// identical identifiers share one fetch.
    pub fn process_batch<H, P: PageSource>(
        &self,
        source: &mut P,
        batch: Vec<(LookupId, H)>,
    ) -> BatchOutcome<H> {
        let groups = dedup::group_requests(batch);
        let avoided = dedup::duplicates_avoided(&groups);
        self.cache.record_duplicates_avoided(avoided);

        let mut results = Vec::new();
        let mut unique_fetches = 0usize;

        for group in groups {
            let record = match self.cache.lookup(&group.key) {
                Some(cached) => {
                    debug!(key = group.key.as_str(), "answered from cache");
                    cached
                }
                None => {
                    unique_fetches += 1;
                    let record = self.resolve(source, &group.id);
                    self.cache.store(&group.key, record.clone());
                    record
                }
            };
            for handle in group.handles {
                results.push((handle, record.clone()));
            }
        }

        info!(
            results = results.len(),
            unique_fetches,
            duplicates_avoided = avoided,
            "batch processed"
        );
        BatchOutcome {
            results,
            unique_fetches,
            duplicates_avoided: avoided,
        }
    }

    /// Run the lookup with bounded retries. "Not found" is terminal; every
    /// other failure is retried up to the configured limit.
    fn resolve<P: PageSource>(&self, source: &mut P, id: &LookupId) -> LawyerRecord {
        let (number, uf) = id.normalized();
        let mut last_failure = LookupFailure::UpstreamFailure;

        for attempt in 1..=self.config.max_extraction_retries {
            match self.attempt_lookup(source, id, &number, &uf) {
                Ok(record) => return record,
                Err(LookupFailure::NotFound) => {
                    debug!(id = %id, "registration not found");
                    last_failure = LookupFailure::NotFound;
                    break;
                }
                Err(failure) => {
                    warn!(
                        id = %id,
                        attempt,
                        max = self.config.max_extraction_retries,
                        reason = failure.reason(),
                        "lookup attempt failed"
                    );
                    last_failure = failure;
                }
            }
        }

        LawyerRecord::failed(&number, &uf, last_failure.reason())
    }

    fn attempt_lookup<P: PageSource>(
        &self,
        source: &mut P,
        id: &LookupId,
        number: &str,
        uf: &str,
    ) -> Result<LawyerRecord, LookupFailure> {
        let capture = source.fetch(id).map_err(|err| {
            warn!(id = %id, error = %err, "page fetch failed");
            LookupFailure::UpstreamFailure
        })?;

        if page_states_not_found(&capture.page_text) {
            return Err(LookupFailure::NotFound);
        }

        let mut record = LawyerRecord::new(number, uf);
        apply_page_text(&mut record, &capture.page_text);

        if let Some(bytes) = &capture.detail_image {
            match recognize_bytes(self.engine, bytes, self.config) {
                Ok(candidate) => {
                    debug!(
                        id = %id,
                        score = candidate.quality_score,
                        variant = candidate.variant_tag,
                        "card rendering recognized"
                    );
                    apply_detail_text(&mut record, &candidate.cleaned_text, self.config);
                }
                Err(err) => {
                    warn!(id = %id, error = %err, "card recognition failed");
                    if record.name.is_empty() {
                        return Err(LookupFailure::NoRecognizableContent);
                    }
                }
            }
        }

        // A "name" made of professional-title words means the recognizer
        // read the wrong region of the card.
        if !record.name.is_empty() && contains_attorney_word(&record.name) {
            return Err(LookupFailure::ImplausibleResult);
        }
        record.name = clean_name(&record.name);

        if record.name.is_empty()
            && record.status.is_empty()
            && record.phone.is_empty()
            && record.address.is_empty()
        {
            return Err(LookupFailure::NoRecognizableContent);
        }

        record.success = true;
        Ok(record)
    }
}

fn page_states_not_found(page_text: &str) -> bool {
    let lower = page_text.to_lowercase();
    NOT_FOUND_MARKERS.iter().any(|marker| lower.contains(marker))
}
