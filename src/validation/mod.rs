//! Format validation for individual field values.
//!
//! Shared by the schema validator and by the scenario context. Each check
//! returns the human-readable reason on failure so callers can attach it to
//! a field name.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Length and format limits for validated fields.
pub mod limits {
    /// Maximum correlation ID length.
    pub const MAX_CORRELATION_ID_LENGTH: usize = 128;
    /// Maximum email length (RFC 5321 path limit).
    pub const MAX_EMAIL_LENGTH: usize = 254;
    /// Australian mobile prefix.
    pub const PHONE_PREFIX: &str = "+614";
    /// Digits following the mobile prefix.
    pub const PHONE_DIGITS: usize = 8;
    /// Lowest accepted mobile number.
    pub const MIN_PHONE: &str = "+61400000000";
    /// Highest accepted mobile number.
    pub const MAX_PHONE: &str = "+61499999999";
    /// Customer reference prefix.
    pub const CUSTOMER_ID_PREFIX: &str = "CUST";
    /// Digits following the customer reference prefix.
    pub const CUSTOMER_ID_DIGITS: usize = 6;
    /// First bookable hour.
    pub const FIRST_SLOT_HOUR: u32 = 9;
    /// Last bookable hour.
    pub const LAST_SLOT_HOUR: u32 = 16;
    /// Longest street line.
    pub const MAX_STREET_LENGTH: usize = 100;
    /// Longest suburb or city name.
    pub const MAX_CITY_LENGTH: usize = 50;
    /// State and territory abbreviations, alphabetical.
    pub const AUSTRALIAN_STATES: &[&str] = &["ACT", "NSW", "NT", "QLD", "SA", "TAS", "VIC", "WA"];
    /// Digits in a postcode.
    pub const POSTCODE_DIGITS: usize = 4;
    /// Lowest allocated postcode.
    pub const MIN_POSTCODE: &str = "0200";
    /// Highest allocated postcode.
    pub const MAX_POSTCODE: &str = "9999";
    /// Only domestic addresses are accepted.
    pub const ADDRESS_COUNTRY: &str = "Australia";
}

/// Error constants for validation failures.
pub mod errmsg {
    pub const CORRELATION_ID_EMPTY: &str = "correlation_id cannot be empty";
    pub const CORRELATION_ID_TOO_LONG: &str = "correlation_id exceeds maximum length";
    pub const CORRELATION_ID_INVALID_CHARS: &str =
        "correlation_id contains invalid characters (allowed: a-zA-Z0-9_-)";

    pub const EMAIL_TOO_LONG: &str = "email exceeds maximum length";
    pub const EMAIL_MALFORMED: &str = "email must have the form local@domain.tld";
    pub const EMAIL_INVALID_CHARS: &str = "email contains whitespace or control characters";

    pub const PHONE_MALFORMED: &str = "phone must be +614 followed by 8 digits";

    pub const CUSTOMER_ID_MALFORMED: &str = "customerId must be CUST followed by 6 digits";

    pub const DATE_MALFORMED: &str = "date must use YYYY-MM-DD";
    pub const TIME_MALFORMED: &str = "time must use HH:MM";
    pub const TIME_NOT_ON_HOUR: &str = "time must fall on the hour";
    pub const TIME_OUTSIDE_HOURS: &str = "time is outside branch hours (09:00-16:00)";

    pub const STATE_UNKNOWN: &str = "state must be an Australian state or territory abbreviation";
    pub const POSTCODE_MALFORMED: &str = "postcode must be 4 digits between 0200 and 9999";
    pub const COUNTRY_UNSUPPORTED: &str = "country must be Australia";
}

/// Validate a correlation ID.
///
/// Rules:
/// - Must not be empty (every scenario carries one)
/// - Maximum 128 characters
/// - May contain: letters (a-zA-Z), digits (0-9), underscore (_), hyphen (-)
pub fn validate_correlation_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(errmsg::CORRELATION_ID_EMPTY.to_string());
    }
    if id.len() > limits::MAX_CORRELATION_ID_LENGTH {
        return Err(format!(
            "{} (max: {}, got: {})",
            errmsg::CORRELATION_ID_TOO_LONG,
            limits::MAX_CORRELATION_ID_LENGTH,
            id.len()
        ));
    }

    for ch in id.chars() {
        if !matches!(ch, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-') {
            return Err(errmsg::CORRELATION_ID_INVALID_CHARS.to_string());
        }
    }

    Ok(())
}

/// Validate an email address shape.
///
/// Rules:
/// - Exactly one `@`, with a non-empty local part
/// - Domain has at least one dot, no empty labels
/// - No whitespace or control characters
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > limits::MAX_EMAIL_LENGTH {
        return Err(format!(
            "{} (max: {}, got: {})",
            errmsg::EMAIL_TOO_LONG,
            limits::MAX_EMAIL_LENGTH,
            email.len()
        ));
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(errmsg::EMAIL_INVALID_CHARS.to_string());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(errmsg::EMAIL_MALFORMED.to_string());
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(errmsg::EMAIL_MALFORMED.to_string());
    }
    if domain.split('.').any(str::is_empty) {
        return Err(errmsg::EMAIL_MALFORMED.to_string());
    }

    Ok(())
}

/// Validate an Australian mobile number (`+614` followed by 8 digits).
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let Some(rest) = phone.strip_prefix(limits::PHONE_PREFIX) else {
        return Err(errmsg::PHONE_MALFORMED.to_string());
    };
    if rest.len() != limits::PHONE_DIGITS || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err(errmsg::PHONE_MALFORMED.to_string());
    }
    Ok(())
}

/// Validate a customer reference (`CUST` followed by 6 digits).
pub fn validate_customer_id(id: &str) -> Result<(), String> {
    let Some(rest) = id.strip_prefix(limits::CUSTOMER_ID_PREFIX) else {
        return Err(errmsg::CUSTOMER_ID_MALFORMED.to_string());
    };
    if rest.len() != limits::CUSTOMER_ID_DIGITS || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err(errmsg::CUSTOMER_ID_MALFORMED.to_string());
    }
    Ok(())
}

/// Validate a state or territory abbreviation.
pub fn validate_state(state: &str) -> Result<(), String> {
    if !limits::AUSTRALIAN_STATES.contains(&state) {
        return Err(errmsg::STATE_UNKNOWN.to_string());
    }
    Ok(())
}

/// Validate an Australian postcode.
///
/// Rules:
/// - Exactly 4 ASCII digits
/// - Between 0200 and 9999 (0000-0199 are unallocated)
pub fn validate_postcode(postcode: &str) -> Result<(), String> {
    if postcode.len() != limits::POSTCODE_DIGITS || !postcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(errmsg::POSTCODE_MALFORMED.to_string());
    }
    // Equal-length digit strings compare like the numbers they spell.
    if postcode < limits::MIN_POSTCODE {
        return Err(errmsg::POSTCODE_MALFORMED.to_string());
    }
    Ok(())
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| errmsg::DATE_MALFORMED.to_string())
}

/// Parse and validate a booking slot time.
///
/// Slots start on the hour between 09:00 and 16:00 inclusive.
pub fn parse_slot_time(value: &str) -> Result<NaiveTime, String> {
    if value.len() != 5 {
        return Err(errmsg::TIME_MALFORMED.to_string());
    }
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| errmsg::TIME_MALFORMED.to_string())?;
    if time.minute() != 0 {
        return Err(errmsg::TIME_NOT_ON_HOUR.to_string());
    }
    if !(limits::FIRST_SLOT_HOUR..=limits::LAST_SLOT_HOUR).contains(&time.hour()) {
        return Err(errmsg::TIME_OUTSIDE_HOURS.to_string());
    }
    Ok(time)
}

/// Age in whole years on `today` for someone born on `dob`.
///
/// Negative when `dob` is in the future.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}
