// src/cnpj.rs

use crate::error::SearchError;

pub const CNPJ_LEN: usize = 14;

/// Keeps only ASCII digits, in order.
pub fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalizes user input into the canonical 14-digit identifier.
pub fn validate(raw: &str) -> Result<String, SearchError> {
    let cnpj = digits(raw);

    if cnpj.len() != CNPJ_LEN {
        return Err(SearchError::InvalidIdentifier);
    }

    Ok(cnpj)
}
