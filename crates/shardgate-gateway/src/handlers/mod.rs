//! Gateway request handlers

pub mod bucket;
pub mod object;
pub mod service;

pub use bucket::*;
pub use object::*;
pub use service::*;

use crate::error::ApiError;

/// Maximum object identifier length
pub const MAX_ID_LENGTH: usize = 32;

/// Object identifiers are at most 32 ASCII letters and digits.
///
/// Bucket names are deliberately not validated by the gateway; they
/// pass through to the backend's own rules.
pub fn is_valid_id(id: &str) -> bool {
    id.len() <= MAX_ID_LENGTH && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Validate an object identifier, reporting which rule failed
pub fn validate_id(id: &str) -> Result<(), ApiError> {
    if id.len() > MAX_ID_LENGTH {
        return Err(ApiError::Validation(format!(
            "ID must not exceed {} characters (current length: {})",
            MAX_ID_LENGTH,
            id.len()
        )));
    }
    if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ApiError::Validation(
            "ID must contain only alphanumeric characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric_ids_up_to_limit() {
        assert!(is_valid_id("obj123"));
        assert!(is_valid_id("OBJ123abc"));
        assert!(is_valid_id(&"a".repeat(32)));
        assert!(is_valid_id(""));
    }

    #[test]
    fn rejects_overlong_ids() {
        assert!(!is_valid_id(&"a".repeat(33)));
        let err = validate_id(&"a".repeat(40)).unwrap_err();
        assert!(err.to_string().contains("current length: 40"));
    }

    #[test]
    fn rejects_non_alphanumeric_ids() {
        for id in ["bad!id", "with space", "under_score", "dash-ed", "dot.ted", "ünïcode"] {
            assert!(!is_valid_id(id), "{} should be invalid", id);
        }
        let err = validate_id("bad!id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ID must contain only alphanumeric characters"
        );
    }
}
