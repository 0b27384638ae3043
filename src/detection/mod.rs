//! Semantic rule engine: five independent heuristic indicators evaluated
//! over the raw URL, complementing the statistical classifier with
//! human-authored attack patterns.

pub mod lexicon;

use serde::Serialize;

/// The five rule scores, each bounded as documented. Recomputed fresh per
/// URL; there is no shared state across calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemanticIndicators {
    /// 0, 1, or 2: known brand in the host; 2 when it sits in the first
    /// (most specific) host label.
    pub brand_impersonation: f64,
    /// 0.0 to 2.0 in 0.5 steps: distinct lexicon keywords found in the URL.
    pub suspicious_keywords: f64,
    /// 0, 0.5, or 1.5: TLD risk tier.
    pub suspicious_tld: f64,
    /// 0, 0.5, or 1.5: host dot count tier.
    pub subdomain_impersonation: f64,
    /// 0, 1.0, or 1.5: URL length tier.
    pub entropy_score: f64,
}

impl SemanticIndicators {
    pub fn total(&self) -> f64 {
        self.brand_impersonation
            + self.suspicious_keywords
            + self.suspicious_tld
            + self.subdomain_impersonation
            + self.entropy_score
    }
}

/// Evaluate all five rules against a raw URL.
///
/// The host is derived here from the lower-cased raw string (text after the
/// last `://`, before the first `/`, after the last `@`, before the first
/// `:`), independently of the normalizer; the rules and the feature
/// extractor deliberately share no state.
pub fn evaluate(url: &str) -> SemanticIndicators {
    let url_lower = url.to_lowercase();
    let domain_part = url_lower
        .rsplit("://")
        .next()
        .unwrap_or(&url_lower)
        .split('/')
        .next()
        .unwrap_or("");
    let hostname = domain_part
        .rsplit('@')
        .next()
        .unwrap_or(domain_part)
        .split(':')
        .next()
        .unwrap_or("");

    let brand_impersonation = brand_impersonation(hostname);
    let suspicious_keywords = suspicious_keywords(&url_lower);
    let suspicious_tld = tld_risk(hostname);
    let subdomain_impersonation = subdomain_layering(hostname);
    let entropy_score = length_tier(&url_lower);

    let indicators = SemanticIndicators {
        brand_impersonation,
        suspicious_keywords,
        suspicious_tld,
        subdomain_impersonation,
        entropy_score,
    };
    log::debug!(
        "semantic indicators for '{}': {:?} (total {:.1})",
        url,
        indicators,
        indicators.total()
    );
    indicators
}

/// Collapse the indicators into a single score in [0, 1].
///
/// The 4.0 denominator is deliberately below the theoretical maximum sum so
/// that two or three simultaneous indicators already saturate the score.
pub fn semantic_score(indicators: &SemanticIndicators) -> f64 {
    (indicators.total() / 4.0).clamp(0.0, 1.0)
}

/// First brand (fixed slice order) found as a substring of the host wins;
/// no accumulation across further matches.
fn brand_impersonation(hostname: &str) -> f64 {
    let first_label = hostname.split('.').next().unwrap_or("");
    for brand in lexicon::BRANDS {
        if hostname.contains(brand) {
            return if first_label.contains(brand) { 2.0 } else { 1.0 };
        }
    }
    0.0
}

fn suspicious_keywords(url_lower: &str) -> f64 {
    let count = lexicon::SUSPICIOUS_KEYWORDS
        .iter()
        .filter(|keyword| url_lower.contains(*keyword))
        .count();
    (count as f64 * 0.5).min(2.0)
}

/// Two-tier set membership on the last host label. Deliberately not a
/// public-suffix-list lookup; the documented thresholds assume this simple
/// rule.
fn tld_risk(hostname: &str) -> f64 {
    let tld = hostname.rsplit('.').next().unwrap_or("");
    if lexicon::SUSPICIOUS_TLDS.contains(&tld) {
        1.5
    } else if !lexicon::TRUSTED_TLDS.contains(&tld) {
        0.5
    } else {
        0.0
    }
}

fn subdomain_layering(hostname: &str) -> f64 {
    let dot_count = hostname.chars().filter(|&c| c == '.').count();
    if dot_count >= 3 {
        1.5
    } else if dot_count == 2 {
        0.5
    } else {
        0.0
    }
}

/// Length tiers are mutually exclusive; the >100 branch is checked first,
/// so a 101-character URL scores 1.5, not 1.0.
fn length_tier(url: &str) -> f64 {
    let length = url.chars().count();
    if length > 100 {
        1.5
    } else if length > 75 {
        1.0
    } else {
        0.0
    }
}
