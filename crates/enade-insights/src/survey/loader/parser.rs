/// Spreadsheet exports mark "not applicable" with blanks, dashes or NaN markers.
pub(crate) fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed == "-"
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
}

/// Parses a decimal cell, accepting a decimal comma.
pub(crate) fn parse_decimal(raw: &str) -> Result<Option<f64>, ()> {
    if is_missing(raw) {
        return Ok(None);
    }

    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.replace(',', "")
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

/// Counts sometimes arrive as `12.0` after a spreadsheet round-trip.
pub(crate) fn parse_count(raw: &str) -> Result<Option<u32>, ()> {
    match parse_decimal(raw)? {
        None => Ok(None),
        Some(value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => {
            Ok(Some(value as u32))
        }
        Some(_) => Err(()),
    }
}

pub(crate) fn parse_text(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_accept_comma_and_missing_markers() {
        assert_eq!(parse_decimal("4,25"), Ok(Some(4.25)));
        assert_eq!(parse_decimal(" 3.5 "), Ok(Some(3.5)));
        assert_eq!(parse_decimal("1,234.5"), Ok(Some(1234.5)));
        assert_eq!(parse_decimal(""), Ok(None));
        assert_eq!(parse_decimal("NaN"), Ok(None));
        assert_eq!(parse_decimal("-"), Ok(None));
        assert_eq!(parse_decimal("abc"), Err(()));
    }

    #[test]
    fn counts_reject_fractions() {
        assert_eq!(parse_count("12.0"), Ok(Some(12)));
        assert_eq!(parse_count("12"), Ok(Some(12)));
        assert_eq!(parse_count("12.5"), Err(()));
        assert_eq!(parse_count("-3"), Err(()));
    }
}
