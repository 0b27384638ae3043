pub mod classifier;
pub mod detection;
pub mod error;
pub mod features;
pub mod hybrid;
pub mod normalization;
pub mod pipeline;

pub use classifier::{ClassLabel, Classifier, LinearModel};
pub use detection::{evaluate, semantic_score, SemanticIndicators};
pub use error::DetectorError;
pub use features::{extract, FeatureVector, FEATURE_COLUMNS};
pub use hybrid::{combine, ConfidenceLevel, HybridResult, RiskCategory};
pub use normalization::{NormalizedUrl, UrlNormalizer};
pub use pipeline::{PhishingDetector, Prediction};
