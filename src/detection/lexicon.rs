//! Static lookup tables for the semantic rules.
//!
//! These are immutable constants, not runtime configuration: the rule
//! thresholds in this crate were calibrated against exactly these sets, and
//! the fixed slice order makes brand matching deterministic.

/// Brand names commonly impersonated in phishing hostnames. Scanned in order;
/// the first match wins.
pub const BRANDS: &[&str] = &[
    "google",
    "facebook",
    "paypal",
    "amazon",
    "apple",
    "microsoft",
    "netflix",
    "adobe",
    "instagram",
    "whatsapp",
    "twitter",
    "linkedin",
    "github",
    "dropbox",
    "slack",
    "zoom",
    "ebay",
    "walmart",
    "target",
    "uber",
    "airbnb",
    "airbus",
    "airplane",
];

/// Credential-theft and urgency vocabulary counted anywhere in the URL.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "verify",
    "confirm",
    "update",
    "login",
    "signin",
    "password",
    "account",
    "security",
    "urgent",
    "action",
    "required",
    "alert",
    "click",
    "claim",
    "validate",
    "authenticate",
    "suspend",
    "limited",
    "restricted",
    "unusual",
    "activity",
    "strange",
    "expire",
    "expired",
    "renew",
];

/// TLDs with weak governance or historically high phishing volume.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "ru", "cn", "tk", "ml", "ga", "cf", "gq", "work", "review", "info", "biz", "zip", "download",
    "top", "online", "site", "website", "red", "party", "click", "stream",
];

/// Established TLDs with registration standards. Anything in neither set
/// scores the middle (unknown) tier.
pub const TRUSTED_TLDS: &[&str] = &[
    "com", "org", "gov", "edu", "net", "co.uk", "de", "fr", "ca", "au", "jp", "in", "br", "mx",
    "it", "es", "nl",
];
