//! Argument checks applied while building a request, before any cache or
//! network access happens.

use chrono::NaiveDate;

use crate::error::AppError;

/// Date format accepted by the remote service
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejects zero identifiers. The remote service numbers resources from 1.
pub fn validate_id(field: &str, id: u64) -> Result<u64, AppError> {
    if id == 0 {
        return Err(AppError::invalid_input(field, "identifier must be non-zero"));
    }
    Ok(id)
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Both the shape and the calendar are checked, so `2025-02-30` and
/// `2025-1-5` are rejected rather than passed through.
pub fn validate_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    let trimmed = value.trim();
    let well_formed = trimmed.len() == 10
        && trimmed
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    if !well_formed {
        return Err(AppError::invalid_input(
            field,
            format!("expected a date in YYYY-MM-DD format, got '{value}'"),
        ));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        AppError::invalid_input(field, format!("'{value}' is not a calendar date: {e}"))
    })
}

/// Checks an inclusive date range.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::invalid_input(
            "end_date",
            format!("{end} is before start date {start}"),
        ));
    }
    Ok(())
}

/// Pages and page sizes start at 1.
pub fn validate_positive(field: &str, value: u32) -> Result<u32, AppError> {
    if value == 0 {
        return Err(AppError::invalid_input(field, "must be at least 1"));
    }
    Ok(value)
}
