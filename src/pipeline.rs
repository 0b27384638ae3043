//! Orchestrates the full detection pipeline: normalize, extract, classify,
//! evaluate semantics, combine.

use crate::classifier::{resolve_phishing_probability, Classifier};
use crate::detection::{self, SemanticIndicators};
use crate::error::DetectorError;
use crate::features::{self, FeatureVector};
use crate::hybrid::{self, ConfidenceLevel, RiskCategory};
use crate::normalization::UrlNormalizer;
use serde::Serialize;

/// The final verdict for one URL. Produced once per call and never mutated;
/// persistence is a caller concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub url: String,
    /// 1 = phishing, 0 = legitimate.
    pub label: u8,
    pub probability: f64,
    pub risk_category: RiskCategory,
    pub confidence_level: ConfidenceLevel,
    pub semantic_score: f64,
    pub indicators: SemanticIndicators,
}

/// The hybrid detector: a loaded classifier plus the rule engine.
///
/// Every call is self-contained and re-entrant; the classifier artifact is
/// the only retained state and is only ever read.
pub struct PhishingDetector {
    normalizer: UrlNormalizer,
    classifier: Box<dyn Classifier>,
}

impl PhishingDetector {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self {
            normalizer: UrlNormalizer::new(),
            classifier,
        }
    }

    /// Score a URL. Either every stage succeeds or the call fails as a
    /// whole; a partial result is never returned.
    pub fn predict(&self, url: &str) -> Result<Prediction, DetectorError> {
        let normalized = self.normalizer.normalize(url)?;
        let vector = features::extract(&normalized);

        // Align the vector to the artifact's training-time schema before
        // classifying; a missing name means extractor and artifact have
        // drifted apart and must not silently mispredict.
        let ordered = vector.reindex(self.classifier.feature_columns())?;
        let probabilities = self.classifier.predict_proba(&ordered);
        let model_probability =
            resolve_phishing_probability(&probabilities, self.classifier.classes())?;

        // The rule engine works from the raw URL, independently of the
        // feature path.
        let indicators = detection::evaluate(url);
        let semantic_score = detection::semantic_score(&indicators);

        let result = hybrid::combine(model_probability, semantic_score);
        log::debug!(
            "'{}': model={:.3} semantic={:.3} combined={:.3} -> {}",
            url,
            model_probability,
            semantic_score,
            result.combined_probability,
            result.risk_category
        );

        Ok(Prediction {
            url: url.to_string(),
            label: result.final_label,
            probability: result.combined_probability,
            risk_category: result.risk_category,
            confidence_level: result.confidence_level,
            semantic_score,
            indicators,
        })
    }

    /// Diagnostic access to the feature path without classifying.
    pub fn extract_features(&self, url: &str) -> Result<FeatureVector, DetectorError> {
        Ok(features::extract(&self.normalizer.normalize(url)?))
    }
}
