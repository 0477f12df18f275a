//! Recognition and structuring pipeline.
//!
//! The pipeline turns one noisy rendering of a registration card into a
//! structured record: [`variants`] derives enhanced versions of the source
//! image, [`recognize`] multiplexes an external recognition engine over every
//! (configuration, variant) pair, [`score`] ranks each candidate transcript,
//! [`normalize`] and [`token_repair`] clean the winning text, and [`extract`]
//! pulls the individual fields out of it.

pub mod extract;
pub mod normalize;
pub mod recognize;
pub mod score;
pub mod token_repair;
pub mod variants;

pub use recognize::{recognize_bytes, run_recognition, RecognitionCandidate, RecognitionEngine};
pub use variants::{generate_variants, ImageVariant};

use thiserror::Error;

/// Faults raised by external collaborators (recognition engine, page source).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The recognition engine itself failed on one attempt.
    #[error("recognition engine failure: {0}")]
    Engine(String),

    /// The upstream page source faulted (navigation, capture, transport).
    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Terminal failures of a full recognition run.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("could not decode source image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Every attempt produced empty or unusable text.
    #[error("no recognizable content in any variant")]
    NoRecognizableContent,
}
