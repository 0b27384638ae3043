use thiserror::Error;

/// Failures surfaced by the detection pipeline. Every error is returned
/// synchronously to the caller; the pipeline never produces partial results.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("URL must be a non-empty string")]
    EmptyInput,

    #[error("failed to parse URL '{input}': {reason}")]
    UrlParse { input: String, reason: String },

    #[error("classifier schema mismatch: {0}")]
    ClassifierSchema(String),

    #[error("feature extractor missing columns: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_features_message_lists_names() {
        let err = DetectorError::MissingFeatures(vec![
            "entropy_of_url".to_string(),
            "domain_length".to_string(),
        ]);
        let message = err.to_string();
        assert!(message.contains("entropy_of_url"));
        assert!(message.contains("domain_length"));
    }

    #[test]
    fn test_url_parse_message_carries_input_and_reason() {
        let err = DetectorError::UrlParse {
            input: "http://[::1/x".to_string(),
            reason: "unbalanced IPv6 brackets in authority".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("http://[::1/x"));
        assert!(message.contains("unbalanced"));
    }
}
