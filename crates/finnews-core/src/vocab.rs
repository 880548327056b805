//! Fixed vocabularies used across the pipeline

/// Sentinel risk token meaning "no risk identified"
///
/// Mutually exclusive with every other risk token: a risk list containing
/// `none` is treated as risk-free regardless of what else survived parsing.
pub const NONE_RISK: &str = "none";

/// Risk categories the entity-risk stage scans for in model output
///
/// The order matters: the substring-scan parsing strategy keeps categories
/// in this order.
pub const RISK_CATEGORIES: [&str; 10] = [
    "regulatory",
    "geopolitical",
    "financial",
    "operational",
    "market",
    "credit",
    "liquidity",
    "reputation",
    "cyber",
    "legal",
];

/// Categories that count toward significant risk in the decision table
pub const HIGH_RISK_CATEGORIES: [&str; 4] = ["regulatory", "geopolitical", "financial", "legal"];

/// Tokens filtered out of parsed risk lists (already lowercased)
pub const NON_RISK_TOKENS: [&str; 5] = ["none", "no", "nil", "na", "n/a"];

/// Common uppercase words mistaken for ticker symbols
pub const TICKER_DENYLIST: [&str; 10] =
    ["USD", "CEO", "CFO", "IPO", "ETF", "SEC", "FDA", "DOJ", "AI", "API"];

/// The default risk list when nothing was identified
pub fn no_risks() -> Vec<String> {
    vec![NONE_RISK.to_string()]
}

/// Whether a parsed token is a high-risk category
pub fn is_high_risk(token: &str) -> bool {
    HIGH_RISK_CATEGORIES.contains(&token)
}
