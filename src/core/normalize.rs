use std::collections::HashSet;

/// Delimiter used by the catalog for skill and interest lists
pub const TOKEN_DELIMITER: char = ',';

/// Normalize a single token: trim surrounding whitespace and lower-case it
///
/// Uses Unicode lower-casing, which does not depend on the process locale.
/// Applying it twice gives the same result as applying it once.
#[inline]
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Normalize a sequence of tokens into a set, keeping first-seen order
///
/// Tokens that are empty after trimming are dropped, duplicates collapse.
pub fn distinct_tokens<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .map(|t| normalize_token(t.as_ref()))
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Split a stored delimited list and normalize it into a token set
pub fn split_tokens(stored: &str) -> Vec<String> {
    distinct_tokens(stored.split(TOKEN_DELIMITER))
}
