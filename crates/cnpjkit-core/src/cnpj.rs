//! CNPJ normalization.
//!
//! Spreadsheet cells arrive in every shape: `12.345.678/0001-95`, a bare
//! number that lost its leading zeros, stray whitespace. [`normalize`] turns
//! them into the canonical form the registry expects.

/// Length of a canonical CNPJ.
pub const CNPJ_LEN: usize = 14;

/// Trim, strip `.`, `-` and `/`, then left-pad with `0` to [`CNPJ_LEN`].
///
/// Never fails. Values that are already longer than 14 characters come back
/// unpadded; use [`is_valid`] before querying.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/'))
        .collect();
    format!("{stripped:0>width$}", width = CNPJ_LEN)
}

/// Returns `true` if `cnpj` is exactly 14 ASCII digits.
pub fn is_valid(cnpj: &str) -> bool {
    cnpj.len() == CNPJ_LEN && cnpj.bytes().all(|b| b.is_ascii_digit())
}
