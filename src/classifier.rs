//! Review language classification
//!
//! The pipeline only depends on [`LanguageClassifier`]; accuracy is the
//! implementation's business. [`LinguaClassifier`] is the default.

use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use tracing::debug;

/// Code returned when no language can be determined
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Text to short language code ("en", "es", ...). Must be deterministic and
/// must always return some code, [`UNKNOWN_LANGUAGE`] if nothing else.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, text: &str) -> String;
}

impl<F> LanguageClassifier for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn classify(&self, text: &str) -> String {
        self(text)
    }
}

/// Candidate language sets for the detector
#[derive(Debug, Clone, Copy, Default)]
pub enum DetectorProfile {
    /// English and Spanish, the pair the review corpus is dominated by
    #[default]
    EnglishSpanish,
}

impl DetectorProfile {
    fn languages(&self) -> &'static [Language] {
        match self {
            DetectorProfile::EnglishSpanish => &[Language::English, Language::Spanish],
        }
    }
}

/// Statistical n-gram detector restricted to a [`DetectorProfile`]
pub struct LinguaClassifier {
    detector: LanguageDetector,
}

impl LinguaClassifier {
    pub fn new() -> Self {
        Self::with_profile(DetectorProfile::default())
    }

    pub fn with_profile(profile: DetectorProfile) -> Self {
        debug!(?profile, "building language detector");
        let detector = LanguageDetectorBuilder::from_languages(profile.languages()).build();
        Self { detector }
    }
}

impl Default for LinguaClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageClassifier for LinguaClassifier {
    fn classify(&self, text: &str) -> String {
        self.detector
            .detect_language_of(text)
            .map(|language| language.iso_code_639_1().to_string())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_and_spanish() {
        let classifier = LinguaClassifier::new();
        assert_eq!(
            classifier.classify("This game is a complete waste of money and time, do not buy it."),
            "en"
        );
        assert_eq!(
            classifier.classify("Este juego es una pérdida de tiempo y de dinero, no lo compren."),
            "es"
        );
    }

    #[test]
    fn test_no_letters_is_unknown() {
        let classifier = LinguaClassifier::new();
        assert_eq!(classifier.classify(""), UNKNOWN_LANGUAGE);
        assert_eq!(classifier.classify("12345 !!!"), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_deterministic() {
        let classifier = LinguaClassifier::new();
        let text = "Crashes every five minutes, refund requested.";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    #[test]
    fn test_closures_are_classifiers() {
        let classifier = |text: &str| {
            if text.starts_with("hola") {
                "es".to_string()
            } else {
                "en".to_string()
            }
        };
        assert_eq!(LanguageClassifier::classify(&classifier, "hola amigos"), "es");
        assert_eq!(LanguageClassifier::classify(&classifier, "hello"), "en");
    }
}
