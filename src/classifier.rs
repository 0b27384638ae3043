//! The seam to the statistical classifier.
//!
//! The pipeline only needs "given N ordered numeric features, return class
//! probabilities", so any trained artifact (forest, boosted trees, logistic
//! model) can sit behind [`Classifier`] without touching the core.

use crate::error::DetectorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A class label as stored in a trained artifact: datasets label classes
/// numerically (0/1) or by name ("legitimate"/"phishing").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Numeric(i64),
    Named(String),
}

pub trait Classifier: Send + Sync {
    /// Feature names the artifact was trained on, in training order.
    fn feature_columns(&self) -> &[String];

    /// Class labels, aligned with the output of `predict_proba`.
    fn classes(&self) -> &[ClassLabel];

    /// Per-class probability distribution for one feature row ordered per
    /// `feature_columns`.
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;
}

const PHISHING_ALIASES: [&str; 4] = ["phishing", "malicious", "fraud", "bad"];

/// Resolve the phishing-class probability from a per-class distribution.
///
/// Prefers the numeric label `1`, then falls back to a case-insensitive name
/// match. Anything else is a schema error: the pipeline must never guess an
/// index and silently mispredict.
pub fn resolve_phishing_probability(
    probabilities: &[f64],
    classes: &[ClassLabel],
) -> Result<f64, DetectorError> {
    if probabilities.len() != classes.len() {
        return Err(DetectorError::ClassifierSchema(format!(
            "{} probabilities for {} classes",
            probabilities.len(),
            classes.len()
        )));
    }

    if let Some(idx) = classes
        .iter()
        .position(|label| matches!(label, ClassLabel::Numeric(1)))
    {
        return Ok(probabilities[idx]);
    }

    for alias in PHISHING_ALIASES {
        let found = classes.iter().position(|label| {
            matches!(label, ClassLabel::Named(name) if name.trim().eq_ignore_ascii_case(alias))
        });
        if let Some(idx) = found {
            return Ok(probabilities[idx]);
        }
    }

    Err(DetectorError::ClassifierSchema(
        "unable to determine phishing class index from model classes".to_string(),
    ))
}

/// A logistic model loaded from a JSON artifact:
/// `{ "feature_columns": [...], "weights": [...], "intercept": f, "classes": [0, 1] }`.
///
/// Stands in for the externally trained classifier in the CLI. The artifact
/// carries its own feature column list so a drifted extractor is caught at
/// prediction time instead of silently mis-scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_columns: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<ClassLabel>,
}

fn default_classes() -> Vec<ClassLabel> {
    vec![ClassLabel::Numeric(0), ClassLabel::Numeric(1)]
}

impl LinearModel {
    pub fn from_json(content: &str) -> Result<Self, DetectorError> {
        let model: LinearModel = serde_json::from_str(content)
            .map_err(|e| DetectorError::ClassifierSchema(format!("invalid model artifact: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read model artifact {}: {}", path.display(), e))?;
        Ok(Self::from_json(&content)?)
    }

    fn validate(&self) -> Result<(), DetectorError> {
        if self.weights.len() != self.feature_columns.len() {
            return Err(DetectorError::ClassifierSchema(format!(
                "{} weights for {} feature columns",
                self.weights.len(),
                self.feature_columns.len()
            )));
        }
        if self.classes.len() != 2 {
            return Err(DetectorError::ClassifierSchema(format!(
                "expected 2 classes, artifact has {}",
                self.classes.len()
            )));
        }
        Ok(())
    }
}

impl Classifier for LinearModel {
    fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let logit: f64 = self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        // Probability of the second (positive) class.
        let p = 1.0 / (1.0 + (-logit).exp());
        vec![1.0 - p, p]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_numeric_one() {
        let classes = vec![ClassLabel::Numeric(0), ClassLabel::Numeric(1)];
        let p = resolve_phishing_probability(&[0.3, 0.7], &classes).unwrap();
        assert_eq!(p, 0.7);
    }

    #[test]
    fn test_resolve_falls_back_to_name() {
        let classes = vec![
            ClassLabel::Named("legitimate".to_string()),
            ClassLabel::Named(" Phishing ".to_string()),
        ];
        let p = resolve_phishing_probability(&[0.2, 0.8], &classes).unwrap();
        assert_eq!(p, 0.8);
    }

    #[test]
    fn test_resolve_rejects_unknown_classes() {
        let classes = vec![ClassLabel::Numeric(7), ClassLabel::Named("spam".to_string())];
        assert!(matches!(
            resolve_phishing_probability(&[0.5, 0.5], &classes),
            Err(DetectorError::ClassifierSchema(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_length_mismatch() {
        let classes = vec![ClassLabel::Numeric(1)];
        assert!(matches!(
            resolve_phishing_probability(&[0.5, 0.5], &classes),
            Err(DetectorError::ClassifierSchema(_))
        ));
    }

    #[test]
    fn test_linear_model_from_json() {
        let model = LinearModel::from_json(
            r#"{"feature_columns": ["url_length", "number_of_at_in_url"],
                "weights": [0.01, 2.0],
                "intercept": -1.0}"#,
        )
        .unwrap();
        assert_eq!(model.classes, default_classes());

        let proba = model.predict_proba(&[50.0, 1.0]);
        assert_eq!(proba.len(), 2);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        // logit = -1.0 + 0.5 + 2.0 > 0, so phishing probability > 0.5.
        assert!(proba[1] > 0.5);
    }

    #[test]
    fn test_linear_model_rejects_weight_mismatch() {
        let result = LinearModel::from_json(
            r#"{"feature_columns": ["url_length"], "weights": [0.1, 0.2], "intercept": 0.0}"#,
        );
        assert!(matches!(result, Err(DetectorError::ClassifierSchema(_))));
    }
}
