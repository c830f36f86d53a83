//! Destination address checks shared by config validation and channels

use validator::ValidateEmail;

/// Shortest accepted phone number, in digits
pub const MIN_PHONE_DIGITS: usize = 7;
/// Longest accepted phone number, in digits (E.164)
pub const MAX_PHONE_DIGITS: usize = 15;

/// Syntactic e-mail check
pub fn is_valid_email(address: &str) -> bool {
    address.validate_email()
}

/// Optional leading `+`, then 7 to 15 ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
}
