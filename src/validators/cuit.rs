//! CUIT/CUIL tax identifier checks.
//!
//! Both identifiers share the same layout: two-digit type prefix, eight-digit
//! document number and a check digit, written either as eleven digits or as
//! `XX-XXXXXXXX-X`.

use validator::ValidationError;

use crate::constants::{ERR_INVALID_CUIL, ERR_INVALID_CUIT};

const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Strip the dashes of a dashed identifier.
///
/// Returns `None` unless the input is eleven digits or the dashed layout.
pub fn normalize_cuit(value: &str) -> Option<String> {
    let value = value.trim();
    let digits = match value.len() {
        11 => value.to_string(),
        13 if value.as_bytes()[2] == b'-' && value.as_bytes()[11] == b'-' => {
            value.replace('-', "")
        }
        _ => return None,
    };
    if digits.len() == 11 && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// Check the layout and the check digit.
pub fn is_valid_cuit(value: &str) -> bool {
    let Some(digits) = normalize_cuit(value) else {
        return false;
    };
    let numbers: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();

    let sum: u32 = numbers.iter().zip(WEIGHTS.iter()).map(|(d, w)| d * w).sum();
    let expected = match 11 - (sum % 11) {
        11 => 0,
        10 => 9,
        v => v,
    };
    expected == numbers[10]
}

/// Render an identifier as `XX-XXXXXXXX-X`.
///
/// Values that are not eleven digits are returned unchanged.
pub fn format_cuit(value: &str) -> String {
    match normalize_cuit(value) {
        Some(d) => format!("{}-{}-{}", &d[..2], &d[2..10], &d[10..]),
        None => value.to_string(),
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Validator for CUIT fields in either layout.
pub fn validate_cuit(value: &str) -> Result<(), ValidationError> {
    if is_valid_cuit(value) {
        Ok(())
    } else {
        Err(invalid("invalid_cuit", ERR_INVALID_CUIT))
    }
}

/// Validator for CUIT fields whose length is checked separately.
///
/// Only well-formed eleven-digit values are checked, so a wrong length
/// reports a single message.
pub fn validate_cuit_check_digit(value: &str) -> Result<(), ValidationError> {
    if normalize_cuit(value).is_none() || is_valid_cuit(value) {
        Ok(())
    } else {
        Err(invalid("invalid_cuit", ERR_INVALID_CUIT))
    }
}

/// Validator for CUIL fields in either layout.
pub fn validate_cuil(value: &str) -> Result<(), ValidationError> {
    if is_valid_cuit(value) {
        Ok(())
    } else {
        Err(invalid("invalid_cuil", ERR_INVALID_CUIL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cuit() {
        assert!(is_valid_cuit("30500010912"));
        assert!(is_valid_cuit("30-50001091-2"));
        assert!(is_valid_cuit("20-12345678-6"));
    }

    #[test]
    fn test_invalid_check_digit() {
        assert!(!is_valid_cuit("30500010312"));
        assert!(!is_valid_cuit("30-50001091-3"));
    }

    #[test]
    fn test_invalid_layout() {
        assert!(!is_valid_cuit("3050001091"));
        assert!(!is_valid_cuit("305000109121"));
        assert!(!is_valid_cuit("30_50001091_2"));
        assert!(!is_valid_cuit("3050001091a"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_cuit("30-50001091-2").as_deref(), Some("30500010912"));
        assert_eq!(normalize_cuit(" 30500010912 ").as_deref(), Some("30500010912"));
        assert_eq!(normalize_cuit("30-5000-1091-2"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_cuit("30500010912"), "30-50001091-2");
        assert_eq!(format_cuit("abc"), "abc");
    }

    #[test]
    fn test_check_digit_validator_ignores_bad_length() {
        assert!(validate_cuit_check_digit("3050001091").is_ok());
        assert!(validate_cuit_check_digit("30500010312").is_err());
        assert!(validate_cuit_check_digit("30500010912").is_ok());
    }

    #[test]
    fn test_validator_messages() {
        let err = validate_cuit("1").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(ERR_INVALID_CUIT));
        let err = validate_cuil("1").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(ERR_INVALID_CUIL));
    }
}
