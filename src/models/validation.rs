use chrono::{NaiveDateTime, Timelike};
use regex::Regex;

/// Check that a datetime's time-of-day falls inside the venue's business
/// window, boundaries inclusive.
pub fn is_time_between_boundaries(
    value: NaiveDateTime,
    lower: (u32, u32),
    upper: (u32, u32),
) -> bool {
    let minutes = value.hour() * 60 + value.minute();
    let lower = lower.0 * 60 + lower.1;
    let upper = upper.0 * 60 + upper.1;
    minutes >= lower && minutes <= upper
}

pub fn is_in_the_future(value: NaiveDateTime, now: NaiveDateTime) -> bool {
    value > now
}

pub fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex must compile");
    re.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let re = Regex::new(r"^\+?[0-9]{0,3}[-. (]*[0-9]{3}[-. )]*[0-9]{3}[-. ]*[0-9]{4}$")
        .expect("phone regex must compile");
    re.is_match(phone)
}
