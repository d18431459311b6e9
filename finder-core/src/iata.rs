/// Returns true when `code` is exactly three letters.
///
/// Only ASCII letters count. Case is ignored here; the provider expects
/// upper-case codes, so callers run input through [`normalize_iata`] first.
pub fn validate_iata(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Trims surrounding whitespace and upper-cases a raw form value.
pub fn normalize_iata(raw: &str) -> String {
    raw.trim().to_uppercase()
}
