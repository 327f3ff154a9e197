//! Acquired-date validation.
//!
//! Dates are entered and stored as `DD/MM/YYYY` strings. Validation happens
//! at save time; a rejected date aborts the write.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date '{input}': expected DD/MM/YYYY")]
    Format { input: String },
    #[error("invalid date '{input}': day does not exist")]
    OutOfRange { input: String },
}

/// Validate a `DD/MM/YYYY` acquired date.
///
/// `31/12/2023` is accepted; `31/02/2023`, `2023/12/31`, and free text are
/// rejected. Empty input is the caller's concern (the field is optional).
pub fn validate_acquired_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 3 || !parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        return Err(DateError::Format {
            input: input.to_string(),
        });
    }
    // Reject transposed orderings like 2023/12/31 before chrono gets a say
    if parts[0].len() > 2 || parts[1].len() > 2 || parts[2].len() != 4 {
        return Err(DateError::Format {
            input: input.to_string(),
        });
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").map_err(|_| DateError::OutOfRange {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_dates() {
        assert!(validate_acquired_date("31/12/2023").is_ok());
        assert!(validate_acquired_date("01/01/1985").is_ok());
        assert!(validate_acquired_date("29/02/2024").is_ok());
    }

    #[test]
    fn rejects_nonexistent_days() {
        assert_eq!(
            validate_acquired_date("31/02/2023"),
            Err(DateError::OutOfRange {
                input: "31/02/2023".to_string()
            })
        );
        assert!(validate_acquired_date("29/02/2023").is_err());
    }

    #[test]
    fn rejects_wrong_ordering_and_garbage() {
        assert!(matches!(
            validate_acquired_date("2023/12/31"),
            Err(DateError::Format { .. })
        ));
        assert!(matches!(
            validate_acquired_date("not-a-date"),
            Err(DateError::Format { .. })
        ));
        assert!(validate_acquired_date("").is_err());
        assert!(validate_acquired_date("12/2023").is_err());
    }
}
