//! Recognition multiplexer.
//!
//! Tries every engine configuration against every image variant, scores each
//! cleaned transcript, and keeps the best candidate seen. Stops early once a
//! candidate reaches the configured quality threshold, and never exceeds the
//! configured attempt cap. Individual engine failures are logged and skipped;
//! only a run with no usable text at all is an error.

use image::DynamicImage;
use tracing::{debug, warn};

use crate::config::LookupConfig;

use super::normalize::clean_recognized_text;
use super::score::score_text;
use super::variants::generate_variants;
use super::{EngineError, RecognitionError};

/// Abstraction over the external text-recognition engine.
///
/// `config` is an engine-specific configuration string; the empty string
/// means engine defaults.
pub trait RecognitionEngine {
    fn recognize(&self, image: &DynamicImage, config: &str) -> Result<String, EngineError>;
}

/// Best transcript found for one image, with provenance.
#[derive(Debug, Clone)]
pub struct RecognitionCandidate {
    pub variant_tag: &'static str,
    pub config_tag: String,
    pub raw_text: String,
    pub cleaned_text: String,
    pub quality_score: u8,
}

/// Run the full (configuration × variant) grid and return the best candidate.
pub fn run_recognition(
    engine: &dyn RecognitionEngine,
    image: &DynamicImage,
    config: &LookupConfig,
) -> Result<RecognitionCandidate, RecognitionError> {
    let variants = generate_variants(image);
    let mut best: Option<RecognitionCandidate> = None;
    let mut attempts = 0usize;

    'configs: for engine_config in &config.ocr_configs {
        for variant in &variants {
            if attempts >= config.max_recognition_attempts {
                break 'configs;
            }
            attempts += 1;

            let raw = match engine.recognize(&variant.image, engine_config) {
                Ok(text) => text,
                Err(err) => {
                    warn!(
                        variant = variant.tag,
                        config = engine_config.as_str(),
                        error = %err,
                        "recognition attempt failed"
                    );
                    continue;
                }
            };

            let cleaned = clean_recognized_text(&raw);
            let score = score_text(&cleaned, &config.score_keywords);

            if best.as_ref().map_or(true, |b| score > b.quality_score) {
                debug!(
                    variant = variant.tag,
                    config = engine_config.as_str(),
                    score,
                    chars = cleaned.chars().count(),
                    "new best recognition candidate"
                );
                best = Some(RecognitionCandidate {
                    variant_tag: variant.tag,
                    config_tag: engine_config.clone(),
                    raw_text: raw,
                    cleaned_text: cleaned,
                    quality_score: score,
                });
            }

            if score >= config.good_enough_score {
                break 'configs;
            }
        }
    }

    match best {
        Some(candidate) if !candidate.cleaned_text.is_empty() => Ok(candidate),
        _ => Err(RecognitionError::NoRecognizableContent),
    }
}

/// Decode an image from raw bytes and run recognition over it.
pub fn recognize_bytes(
    engine: &dyn RecognitionEngine,
    bytes: &[u8],
    config: &LookupConfig,
) -> Result<RecognitionCandidate, RecognitionError> {
    let image = image::load_from_memory(bytes)?;
    run_recognition(engine, &image, config)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct ScriptedEngine {
        outputs: Vec<Result<String, EngineError>>,
        calls: Cell<usize>,
    }

    impl ScriptedEngine {
        fn new(outputs: Vec<Result<String, EngineError>>) -> Self {
            Self {
                outputs,
                calls: Cell::new(0),
            }
        }
    }

    impl RecognitionEngine for ScriptedEngine {
        fn recognize(&self, _image: &DynamicImage, _config: &str) -> Result<String, EngineError> {
            let i = self.calls.get();
            self.calls.set(i + 1);
            match self.outputs.get(i) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(EngineError::Engine(msg))) => Err(EngineError::Engine(msg.clone())),
                _ => Ok(String::new()),
            }
        }
    }

    fn high_quality_text() -> String {
        "ADVOGADO JOAO SILVA SANTOS\nInscricao: 123456\nSeccional: SP\n\
         Situacao: REGULAR\nTelefone Profissional: (11) 98765-4321\nEndereco: RUA X"
            .to_string()
    }

    #[test]
    fn short_circuits_on_good_enough_candidate() {
        let engine = ScriptedEngine::new(vec![Ok(high_quality_text())]);
        let image = DynamicImage::new_rgb8(4, 4);
        let config = LookupConfig::default();

        let candidate = run_recognition(&engine, &image, &config).unwrap();
        assert_eq!(engine.calls.get(), 1);
        assert!(candidate.quality_score >= config.good_enough_score);
        assert_eq!(candidate.variant_tag, "resize_2x");
    }

    #[test]
    fn skips_failed_attempts_and_keeps_best() {
        let engine = ScriptedEngine::new(vec![
            Err(EngineError::Engine("timeout".into())),
            Ok("texto curto demais".into()),
            Ok(high_quality_text()),
        ]);
        let image = DynamicImage::new_rgb8(4, 4);
        let config = LookupConfig::default();

        let candidate = run_recognition(&engine, &image, &config).unwrap();
        assert_eq!(engine.calls.get(), 3);
        assert!(candidate.cleaned_text.contains("JOAO SILVA SANTOS"));
    }

    #[test]
    fn no_usable_text_is_an_error() {
        let engine = ScriptedEngine::new(vec![]);
        let image = DynamicImage::new_rgb8(4, 4);
        let config = LookupConfig::default().with_max_recognition_attempts(6);

        let result = run_recognition(&engine, &image, &config);
        assert!(matches!(result, Err(RecognitionError::NoRecognizableContent)));
    }

    #[test]
    fn attempt_cap_is_honored() {
        let engine = ScriptedEngine::new(vec![]);
        let image = DynamicImage::new_rgb8(4, 4);
        let config = LookupConfig::default().with_max_recognition_attempts(4);

        let _ = run_recognition(&engine, &image, &config);
        assert_eq!(engine.calls.get(), 4);
    }

    #[test]
    fn recognize_bytes_rejects_garbage() {
        let engine = ScriptedEngine::new(vec![]);
        let config = LookupConfig::default();
        let result = recognize_bytes(&engine, b"not an image", &config);
        assert!(matches!(result, Err(RecognitionError::ImageDecode(_))));
    }
}
