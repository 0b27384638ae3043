use crate::error::DetectorError;
use crate::normalization::NormalizedUrl;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// The 41 feature names, in the exact order the classifier was trained on.
///
/// This ordering is a versioned contract: renaming or reordering a column
/// requires retraining the classifier artifact, so the list must never change
/// independently of it.
pub const FEATURE_COLUMNS: [&str; 41] = [
    // URL-level
    "url_length",
    "number_of_dots_in_url",
    "having_repeated_digits_in_url",
    "number_of_digits_in_url",
    "number_of_special_char_in_url",
    "number_of_hyphens_in_url",
    "number_of_underline_in_url",
    "number_of_slash_in_url",
    "number_of_questionmark_in_url",
    "number_of_equal_in_url",
    "number_of_at_in_url",
    "number_of_dollar_in_url",
    "number_of_exclamation_in_url",
    "number_of_hashtag_in_url",
    "number_of_percent_in_url",
    // Domain-level
    "domain_length",
    "number_of_dots_in_domain",
    "number_of_hyphens_in_domain",
    "having_special_characters_in_domain",
    "number_of_special_characters_in_domain",
    "having_digits_in_domain",
    "number_of_digits_in_domain",
    "having_repeated_digits_in_domain",
    // Subdomain-level
    "number_of_subdomains",
    "having_dot_in_subdomain",
    "having_hyphen_in_subdomain",
    "average_subdomain_length",
    "average_number_of_dots_in_subdomain",
    "average_number_of_hyphens_in_subdomain",
    "having_special_characters_in_subdomain",
    "number_of_special_characters_in_subdomain",
    "having_digits_in_subdomain",
    "number_of_digits_in_subdomain",
    "having_repeated_digits_in_subdomain",
    // Path and query
    "having_path",
    "path_length",
    "having_query",
    "having_fragment",
    "having_anchor",
    // Entropy
    "entropy_of_url",
    "entropy_of_domain",
];

/// An ordered mapping of the 41 feature slots to numeric values.
///
/// Values are stored positionally against [`FEATURE_COLUMNS`]; construction
/// guarantees there are never missing or extra slots.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_COLUMNS
            .iter()
            .position(|&column| column == name)
            .map(|idx| self.values[idx])
    }

    /// Re-order the vector to a classifier's expected column list.
    ///
    /// Names this extractor does not produce indicate a version mismatch
    /// between extractor and artifact and are a hard error; columns the
    /// classifier does not ask for are dropped.
    pub fn reindex(&self, columns: &[String]) -> Result<Vec<f64>, DetectorError> {
        let mut ordered = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();
        for column in columns {
            match self.get(column) {
                Some(value) => ordered.push(value),
                None => missing.push(column.clone()),
            }
        }
        if missing.is_empty() {
            Ok(ordered)
        } else {
            Err(DetectorError::MissingFeatures(missing))
        }
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COLUMNS.len()))?;
        for (name, value) in FEATURE_COLUMNS.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Compute the 41-feature vector from a normalized URL.
///
/// Pure function of its input: no I/O, deterministic, linear in URL length.
pub fn extract(url: &NormalizedUrl) -> FeatureVector {
    let full = url.full.as_str();
    let host = url.host.as_str();

    let domain_special_count = count_special_characters(host);
    let domain_digit_count = count_digits(host);

    let subdomains = subdomain_parts(host);
    let sub = SubdomainMetrics::aggregate(&subdomains);

    let values = vec![
        // URL-level
        char_len(full),
        count_char(full, '.'),
        has_repeated_digit(full),
        count_digits(full) as f64,
        count_special_characters(full) as f64,
        count_char(full, '-'),
        count_char(full, '_'),
        count_char(full, '/'),
        count_char(full, '?'),
        count_char(full, '='),
        count_char(full, '@'),
        count_char(full, '$'),
        count_char(full, '!'),
        count_char(full, '#'),
        count_char(full, '%'),
        // Domain-level
        char_len(host),
        count_char(host, '.'),
        count_char(host, '-'),
        flag(domain_special_count > 0),
        domain_special_count as f64,
        flag(domain_digit_count > 0),
        domain_digit_count as f64,
        has_repeated_digit(host),
        // Subdomain-level
        sub.count,
        sub.has_dot,
        sub.has_hyphen,
        sub.average_length,
        sub.average_dots,
        sub.average_hyphens,
        sub.has_special,
        sub.special_count,
        sub.has_digit,
        sub.digit_count,
        sub.has_repeated_digit,
        // Path and query
        flag(!url.path.is_empty() && url.path != "/"),
        char_len(&url.path),
        flag(!url.query.is_empty()),
        flag(!url.fragment.is_empty()),
        // Checks the literal character, not the parsed fragment; the two
        // diverge on malformed input and that divergence is intentional.
        flag(full.contains('#')),
        // Entropy
        shannon_entropy(full),
        shannon_entropy(host),
    ];

    debug_assert_eq!(values.len(), FEATURE_COLUMNS.len());
    FeatureVector { values }
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

fn char_len(text: &str) -> f64 {
    text.chars().count() as f64
}

fn count_char(text: &str, needle: char) -> f64 {
    text.chars().filter(|&c| c == needle).count() as f64
}

fn count_digits(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

fn count_special_characters(text: &str) -> usize {
    text.chars().filter(|c| !c.is_alphanumeric()).count()
}

/// 1.0 if any single digit 0-9 occurs two or more times anywhere in `text`.
/// A presence test over digit identity counts, not positional adjacency.
fn has_repeated_digit(text: &str) -> f64 {
    let mut counts = [0u32; 10];
    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            counts[d as usize] += 1;
        }
    }
    flag(counts.iter().any(|&count| count > 1))
}

/// Shannon entropy in bits over character frequencies. Empty text is 0.0.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut length = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        length += 1;
    }
    if length == 0 {
        return 0.0;
    }
    let n = length as f64;
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Dot-delimited host labels excluding the registrable domain and TLD.
/// A host with two or fewer labels has no subdomains.
fn subdomain_parts(host: &str) -> Vec<&str> {
    let parts: Vec<&str> = host.split('.').filter(|segment| !segment.is_empty()).collect();
    if parts.len() <= 2 {
        Vec::new()
    } else {
        parts[..parts.len() - 2].to_vec()
    }
}

/// Aggregates over the subdomain part list. Identity values (0/0.0) when the
/// list is empty, never a missing slot.
struct SubdomainMetrics {
    count: f64,
    average_length: f64,
    average_dots: f64,
    average_hyphens: f64,
    special_count: f64,
    has_special: f64,
    digit_count: f64,
    has_digit: f64,
    has_repeated_digit: f64,
    has_dot: f64,
    has_hyphen: f64,
}

impl SubdomainMetrics {
    fn aggregate(parts: &[&str]) -> Self {
        if parts.is_empty() {
            return Self {
                count: 0.0,
                average_length: 0.0,
                average_dots: 0.0,
                average_hyphens: 0.0,
                special_count: 0.0,
                has_special: 0.0,
                digit_count: 0.0,
                has_digit: 0.0,
                has_repeated_digit: 0.0,
                has_dot: 0.0,
                has_hyphen: 0.0,
            };
        }

        let count = parts.len() as f64;
        let total_length: f64 = parts.iter().map(|part| char_len(part)).sum();
        let total_dots: f64 = parts.iter().map(|part| count_char(part, '.')).sum();
        let total_hyphens: f64 = parts.iter().map(|part| count_char(part, '-')).sum();
        let special_count: usize = parts.iter().map(|part| count_special_characters(part)).sum();
        let digit_count: usize = parts.iter().map(|part| count_digits(part)).sum();
        let repeated = parts.iter().any(|part| has_repeated_digit(part) > 0.0);

        Self {
            count,
            average_length: total_length / count,
            average_dots: total_dots / count,
            average_hyphens: total_hyphens / count,
            special_count: special_count as f64,
            has_special: flag(special_count > 0),
            digit_count: digit_count as f64,
            has_digit: flag(digit_count > 0),
            has_repeated_digit: flag(repeated),
            // Multiple parts were produced by splitting on dots.
            has_dot: flag(parts.len() > 1),
            has_hyphen: flag(parts.iter().any(|part| part.contains('-'))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::UrlNormalizer;

    fn extract_from(raw: &str) -> FeatureVector {
        let normalizer = UrlNormalizer::new();
        extract(&normalizer.normalize(raw).unwrap())
    }

    #[test]
    fn test_always_41_features() {
        for raw in [
            "https://www.wikipedia.org",
            "localhost",
            "http:///no/host",
            "a",
            "http://x.y.z.w.q.com/a?b=c#d",
        ] {
            let vector = extract_from(raw);
            assert_eq!(vector.values().len(), 41, "input: {raw}");
        }
    }

    #[test]
    fn test_wikipedia_values() {
        let vector = extract_from("https://www.wikipedia.org");
        assert_eq!(vector.get("url_length"), Some(25.0));
        assert_eq!(vector.get("number_of_dots_in_url"), Some(2.0));
        assert_eq!(vector.get("number_of_slash_in_url"), Some(2.0));
        assert_eq!(vector.get("domain_length"), Some(17.0));
        assert_eq!(vector.get("number_of_dots_in_domain"), Some(2.0));
        // "www" is the only subdomain part.
        assert_eq!(vector.get("number_of_subdomains"), Some(1.0));
        assert_eq!(vector.get("average_subdomain_length"), Some(3.0));
        assert_eq!(vector.get("having_dot_in_subdomain"), Some(0.0));
        assert_eq!(vector.get("having_path"), Some(0.0));
        assert_eq!(vector.get("path_length"), Some(0.0));
        assert_eq!(vector.get("having_query"), Some(0.0));
        assert_eq!(vector.get("having_anchor"), Some(0.0));
        assert!(vector.get("entropy_of_url").unwrap() > 0.0);
    }

    #[test]
    fn test_counting_runs_over_normalized_string() {
        // Scheme injection adds "http://" before counting.
        let vector = extract_from("example.com");
        assert_eq!(vector.get("url_length"), Some(18.0));
        assert_eq!(vector.get("number_of_slash_in_url"), Some(2.0));
        // ':' '/' '/' '.' fail the alphanumeric test.
        assert_eq!(vector.get("number_of_special_char_in_url"), Some(4.0));
    }

    #[test]
    fn test_repeated_digits_by_identity_not_adjacency() {
        // '1' occurs twice, non-adjacent.
        let vector = extract_from("http://a1b2c1.com");
        assert_eq!(vector.get("having_repeated_digits_in_url"), Some(1.0));
        assert_eq!(vector.get("having_repeated_digits_in_domain"), Some(1.0));
        // Three distinct digits, each once.
        let vector = extract_from("http://a1b2c3.com");
        assert_eq!(vector.get("having_repeated_digits_in_domain"), Some(0.0));
    }

    #[test]
    fn test_degenerate_host_zeroes_subdomain_aggregates() {
        let vector = extract_from("http://localhost/path");
        for name in [
            "number_of_subdomains",
            "having_dot_in_subdomain",
            "having_hyphen_in_subdomain",
            "average_subdomain_length",
            "average_number_of_dots_in_subdomain",
            "average_number_of_hyphens_in_subdomain",
            "having_special_characters_in_subdomain",
            "number_of_special_characters_in_subdomain",
            "having_digits_in_subdomain",
            "number_of_digits_in_subdomain",
            "having_repeated_digits_in_subdomain",
        ] {
            assert_eq!(vector.get(name), Some(0.0), "feature: {name}");
        }
    }

    #[test]
    fn test_subdomain_aggregates() {
        // Host fake-12.google.attacker.com: parts are ["fake-12", "google"].
        let vector = extract_from("http://fake-12.google.attacker.com");
        assert_eq!(vector.get("number_of_subdomains"), Some(2.0));
        assert_eq!(vector.get("having_dot_in_subdomain"), Some(1.0));
        assert_eq!(vector.get("having_hyphen_in_subdomain"), Some(1.0));
        assert_eq!(vector.get("average_subdomain_length"), Some(6.5));
        assert_eq!(vector.get("average_number_of_hyphens_in_subdomain"), Some(0.5));
        assert_eq!(vector.get("having_digits_in_subdomain"), Some(1.0));
        assert_eq!(vector.get("number_of_digits_in_subdomain"), Some(2.0));
        assert_eq!(vector.get("having_repeated_digits_in_subdomain"), Some(0.0));
        assert_eq!(vector.get("number_of_special_characters_in_subdomain"), Some(1.0));
    }

    #[test]
    fn test_having_path_ignores_bare_slash() {
        assert_eq!(extract_from("http://a.com/").get("having_path"), Some(0.0));
        assert_eq!(extract_from("http://a.com/x").get("having_path"), Some(1.0));
        assert_eq!(extract_from("http://a.com/").get("path_length"), Some(1.0));
    }

    #[test]
    fn test_shannon_entropy() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert!((shannon_entropy("abab") - 1.0).abs() < 1e-12);
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_reindex_to_classifier_schema() {
        let vector = extract_from("https://www.wikipedia.org");
        let columns: Vec<String> = ["domain_length", "url_length"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(vector.reindex(&columns).unwrap(), vec![17.0, 25.0]);

        let columns = vec!["url_length".to_string(), "no_such_feature".to_string()];
        match vector.reindex(&columns) {
            Err(DetectorError::MissingFeatures(missing)) => {
                assert_eq!(missing, vec!["no_such_feature".to_string()]);
            }
            other => panic!("expected MissingFeatures, got {other:?}"),
        }
    }
}
