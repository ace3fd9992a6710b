use elec_core::form::format_thousands;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a bill amount cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes amount input: trims whitespace, drops a trailing currency
/// suffix (`円` or `yen`) and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_suffix('円')
        .or_else(|| trimmed.strip_suffix("yen"))
        .unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses a bill amount.
///
/// Handles comma as thousands separator (e.g. `"12,000"`) and a trailing
/// currency suffix. Empty or whitespace-only input is `Ok(None)`, which
/// clears the field.
pub fn parse_amount(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an optional amount for an input box, using an empty string when `None`.
pub fn opt_amount_display(d: Option<Decimal>) -> String {
    d.map(format_thousands).unwrap_or_default()
}
