//! Blends the classifier probability with the semantic score and maps the
//! result onto discrete risk labels.

use serde::Serialize;
use std::fmt;

const MODEL_WEIGHT: f64 = 0.4;
const SEMANTIC_WEIGHT: f64 = 0.6;
const BOOST_THRESHOLD: f64 = 0.7;
const BOOST: f64 = 0.2;

/// Confidence tier derived from the combined probability. Distinct from
/// [`RiskCategory`]: the two use different boundaries and different label
/// sets on purpose, and both are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "Very High Risk")]
    VeryHighRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceLevel::VeryHighRisk => "Very High Risk",
            ConfidenceLevel::HighRisk => "High Risk",
            ConfidenceLevel::MediumRisk => "Medium Risk",
            ConfidenceLevel::LowRisk => "Low Risk",
        };
        f.write_str(label)
    }
}

/// Coarser user-facing categorization of the combined probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskCategory {
    Safe,
    Suspicious,
    #[serde(rename = "Likely Phishing")]
    LikelyPhishing,
    #[serde(rename = "High Risk Phishing")]
    HighRiskPhishing,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskCategory::Safe => "Safe",
            RiskCategory::Suspicious => "Suspicious",
            RiskCategory::LikelyPhishing => "Likely Phishing",
            RiskCategory::HighRiskPhishing => "High Risk Phishing",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HybridResult {
    pub combined_probability: f64,
    pub confidence_level: ConfidenceLevel,
    /// 1 = phishing, 0 = legitimate.
    pub final_label: u8,
    pub risk_category: RiskCategory,
}

/// Blend the model probability (40%) with the semantic score (60%).
///
/// When the semantic rules are confident (> 0.7) the combined score gets a
/// single +0.2 boost, clamped to 1.0: the rules carry more authority than
/// the model on the patterns they were written for.
pub fn combine(model_probability: f64, semantic_score: f64) -> HybridResult {
    let mut combined = model_probability * MODEL_WEIGHT + semantic_score * SEMANTIC_WEIGHT;
    if semantic_score > BOOST_THRESHOLD {
        combined = (combined + BOOST).min(1.0);
    }

    let confidence_level = if combined >= 0.8 {
        ConfidenceLevel::VeryHighRisk
    } else if combined >= 0.6 {
        ConfidenceLevel::HighRisk
    } else if combined >= 0.4 {
        ConfidenceLevel::MediumRisk
    } else {
        ConfidenceLevel::LowRisk
    };

    HybridResult {
        combined_probability: combined,
        confidence_level,
        final_label: if combined >= 0.5 { 1 } else { 0 },
        risk_category: categorize_risk(combined),
    }
}

fn categorize_risk(probability: f64) -> RiskCategory {
    if probability < 0.30 {
        RiskCategory::Safe
    } else if probability < 0.60 {
        RiskCategory::Suspicious
    } else if probability < 0.85 {
        RiskCategory::LikelyPhishing
    } else {
        RiskCategory::HighRiskPhishing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero() {
        let result = combine(0.0, 0.0);
        assert_eq!(result.combined_probability, 0.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::LowRisk);
        assert_eq!(result.final_label, 0);
        assert_eq!(result.risk_category, RiskCategory::Safe);
    }

    #[test]
    fn test_all_one_clamps() {
        let result = combine(1.0, 1.0);
        assert_eq!(result.combined_probability, 1.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::VeryHighRisk);
        assert_eq!(result.final_label, 1);
        assert_eq!(result.risk_category, RiskCategory::HighRiskPhishing);
    }

    #[test]
    fn test_boost_threshold_is_strict() {
        // Exactly 0.7 gets no boost; just above does.
        let unboosted = combine(0.0, 0.7);
        assert!((unboosted.combined_probability - 0.42).abs() < 1e-12);
        let boosted = combine(0.0, 0.71);
        assert!((boosted.combined_probability - (0.426 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_label_threshold() {
        assert_eq!(combine(0.5, 0.5).final_label, 1);
        assert_eq!(combine(0.49, 0.49).final_label, 0);
    }

    #[test]
    fn test_dual_categorizations_stay_distinct() {
        // combined = 0.5: "Medium Risk" confidence but "Suspicious" category.
        let result = combine(0.5, 0.5);
        assert_eq!(result.confidence_level, ConfidenceLevel::MediumRisk);
        assert_eq!(result.risk_category, RiskCategory::Suspicious);

        // combined = 0.62: "High Risk" confidence, "Likely Phishing" category.
        let result = combine(0.8, 0.5);
        assert_eq!(result.confidence_level, ConfidenceLevel::HighRisk);
        assert_eq!(result.risk_category, RiskCategory::LikelyPhishing);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(categorize_risk(0.29), RiskCategory::Safe);
        assert_eq!(categorize_risk(0.30), RiskCategory::Suspicious);
        assert_eq!(categorize_risk(0.59), RiskCategory::Suspicious);
        assert_eq!(categorize_risk(0.60), RiskCategory::LikelyPhishing);
        assert_eq!(categorize_risk(0.84), RiskCategory::LikelyPhishing);
        assert_eq!(categorize_risk(0.85), RiskCategory::HighRiskPhishing);
    }
}
