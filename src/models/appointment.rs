use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::reservation::parse_input_datetime;
use crate::models::validation::{
    is_in_the_future, is_time_between_boundaries, is_valid_email, is_valid_phone,
};

/// Appointments may be booked between these times of day.
const OPENING_TIME: (u32, u32) = (9, 0);
const CLOSING_TIME: (u32, u32) = (19, 30);

/// A consultation appointment with the venue staff.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Option<i64>,
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// HTML datetime-local formatted, `YYYY-MM-DDThh:mm`.
    pub date_time: String,
    /// The backend keeps the original French field name on the wire.
    #[serde(rename = "raison")]
    pub reason: String,
    pub status: Option<String>,
    pub additional_info: Option<String>,
}

impl Appointment {
    /// Field-level validation mirroring what the frontend enforces before an
    /// appointment request is forwarded to the backend.
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last name is required".to_string());
        }
        if !is_valid_email(&self.email) {
            errors.push("Invalid email address".to_string());
        }
        if !is_valid_phone(&self.phone) {
            errors.push("Invalid phone number".to_string());
        }
        if self.reason.trim().is_empty() {
            errors.push("The reason is required".to_string());
        }

        match parse_input_datetime(&self.date_time) {
            Some(date_time) => {
                if !is_in_the_future(date_time, now) {
                    errors.push("Date and time must be in the future".to_string());
                }
                if !is_time_between_boundaries(date_time, OPENING_TIME, CLOSING_TIME) {
                    errors.push("Time must be between 9:00 AM and 7:30 PM".to_string());
                }
            }
            None => errors.push("Date and time are required".to_string()),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
