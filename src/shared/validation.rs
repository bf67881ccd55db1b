use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating contact phone numbers
    /// Optional leading '+', then 5-12 digits (the column caps total length at 12)
    /// - Valid: "123456789012", "+7999000112", "89001"
    /// - Invalid: "12-34", "phone", "1234", ""
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{5,12}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("123456789012"));
        assert!(PHONE_REGEX.is_match("+7999000112"));
        assert!(PHONE_REGEX.is_match("89001"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("12-34")); // separator
        assert!(!PHONE_REGEX.is_match("phone")); // letters
        assert!(!PHONE_REGEX.is_match("1234")); // too short
        assert!(!PHONE_REGEX.is_match("")); // empty
        assert!(!PHONE_REGEX.is_match("1 234 567")); // spaces
    }
}
