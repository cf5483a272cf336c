//! Shipping address validation.
//!
//! Runs before any order is created so the buyer sees one actionable message
//! at a time. Checks run in a fixed order and the first failure wins: missing
//! fields, then phone, then pincode.

use thiserror::Error;

use crate::api::types::ShippingAddress;

/// Why a shipping address was rejected.
///
/// Messages are buyer-facing and shown verbatim in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// One or more required fields is blank.
    #[error("Please fill in all required fields")]
    MissingFields,
    /// The phone number is too short.
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    /// The pincode is not exactly six characters.
    #[error("Please enter a valid 6-digit pincode")]
    InvalidPincode,
}

/// Validate a shipping address.
///
/// Required fields are full name, phone, address line 1, city, state, and
/// pincode; the second address line is optional. Whitespace-only input
/// counts as blank. The phone must have at least ten characters after
/// trimming and the pincode exactly six.
///
/// # Errors
///
/// Returns the first failing check in fixed order.
pub fn validate(address: &ShippingAddress) -> Result<(), AddressError> {
    let required = [
        &address.full_name,
        &address.phone,
        &address.address_line1,
        &address.city,
        &address.state,
        &address.pincode,
    ];

    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AddressError::MissingFields);
    }

    if address.phone.trim().chars().count() < 10 {
        return Err(AddressError::InvalidPhone);
    }

    if address.pincode.trim().chars().count() != 6 {
        return Err(AddressError::InvalidPincode);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Mason Rao".to_string(),
            phone: "9876543210".to_string(),
            address_line1: "14 Industrial Estate".to_string(),
            address_line2: None,
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            pincode: "411001".to_string(),
        }
    }

    #[test]
    fn test_valid_address_passes() {
        assert_eq!(validate(&valid_address()), Ok(()));
    }

    #[test]
    fn test_line2_is_optional() {
        let mut address = valid_address();
        address.address_line2 = Some(String::new());
        assert_eq!(validate(&address), Ok(()));
    }

    #[test]
    fn test_blank_required_field() {
        let mut address = valid_address();
        address.city = "   ".to_string();
        assert_eq!(validate(&address), Err(AddressError::MissingFields));
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut address = valid_address();
        address.phone = "987654321".to_string(); // nine digits
        let err = validate(&address).unwrap_err();
        assert_eq!(err, AddressError::InvalidPhone);
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn test_phone_trimmed_before_length_check() {
        let mut address = valid_address();
        address.phone = "  987654321  ".to_string();
        assert_eq!(validate(&address), Err(AddressError::InvalidPhone));

        address.phone = " 9876543210 ".to_string();
        assert_eq!(validate(&address), Ok(()));
    }

    #[test]
    fn test_pincode_must_be_six_characters() {
        let mut address = valid_address();
        address.pincode = "4110".to_string();
        assert_eq!(validate(&address), Err(AddressError::InvalidPincode));

        address.pincode = "4110011".to_string();
        assert_eq!(validate(&address), Err(AddressError::InvalidPincode));
    }

    #[test]
    fn test_missing_fields_wins_over_format_checks() {
        let mut address = valid_address();
        address.full_name = String::new();
        address.phone = "12".to_string();
        assert_eq!(validate(&address), Err(AddressError::MissingFields));
    }
}
