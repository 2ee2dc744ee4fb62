//! Cookie header parsing and accumulation.

/// Extract the `name=value` payload from one `Set-Cookie` header line.
///
/// Attributes after the first `;` (path, expiry, flags) are discarded.
/// Returns `None` when the leading segment carries no `=` at all.
pub fn parse_set_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    if pair.contains('=') {
        Some(pair.to_string())
    } else {
        None
    }
}

/// Collect every `Set-Cookie` occurrence from a response header list
/// into one serialized `Cookie`-style string.
///
/// Header name matching is case-insensitive and order of appearance is
/// preserved. Returns `None` when no usable cookie was found.
pub fn harvest(headers: &[(String, String)]) -> Option<String> {
    let pairs: Vec<String> = headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("set-cookie"))
        .filter_map(|(_, value)| parse_set_cookie(value))
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Layer newly received cookies over a previously held cookie string.
///
/// New assignments come first and the prior string is appended verbatim.
/// Merging is plain concatenation, not key-aware replacement: a cookie
/// resent under the same name keeps both the old and the new assignment
/// in the stored string. Responses carrying no cookies leave the prior
/// string untouched.
pub fn merge(new: Option<String>, prior: Option<&str>) -> Option<String> {
    match (new, prior) {
        (Some(new), Some(prior)) => Some(format!("{new}; {prior}")),
        (Some(new), None) => Some(new),
        (None, Some(prior)) => Some(prior.to_string()),
        (None, None) => None,
    }
}
