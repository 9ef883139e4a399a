use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::addon::AddOnSelection;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_BOOKED: &str = "Booked";
pub const STATUS_CANCELLED: &str = "Cancelled";

pub const COMPUTATION_METHOD_AUTO: &str = "Auto";
pub const COMPUTATION_METHOD_MANUAL: &str = "Manual";

/// Wire format the backend uses for reservation datetimes,
/// e.g. `2026-09-12, 06:30 PM`.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%d, %I:%M %p";

/// Format the HTML `datetime-local` inputs use, e.g. `2026-09-12T18:30`.
pub const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn format_wire_datetime(value: NaiveDateTime) -> String {
    value.format(WIRE_DATETIME_FORMAT).to_string()
}

pub fn parse_wire_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, WIRE_DATETIME_FORMAT).ok()
}

pub fn parse_input_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, INPUT_DATETIME_FORMAT).ok()
}

/// The rates captured by the backend when a reservation was priced. Used to
/// seed the price breakdown when an existing reservation is edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRates {
    pub facility_rate: Decimal,
    pub cleaning_rate: Decimal,
    pub seat_rate: Decimal,
    pub overtime_rate: Decimal,
}

/// A reservation as stored by the backend.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Option<i64>,
    pub user_id: String,
    pub starting_date_time: String,
    pub ending_date_time: String,
    #[serde(default)]
    pub effective_ending_date_time: Option<String>,
    pub event_type: String,
    pub number_of_seats: u32,
    #[serde(default)]
    pub add_ons: Vec<AddOnSelection>,
    pub add_ons_total_cost: Decimal,
    pub status: String,
    #[serde(default)]
    pub full_package: bool,
    #[serde(default)]
    pub security_deposit_refunded: bool,
    pub tax_rate: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub rates: Option<CapturedRates>,
    pub price_computation_method: String,
}

/// The serialized reservation draft handed to the backend on submit.
/// Datetimes are normalized to [`WIRE_DATETIME_FORMAT`] and the effective
/// ending is omitted entirely when the event has not happened yet.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    pub id: Option<i64>,
    pub user_id: String,
    pub starting_date_time: String,
    pub ending_date_time: String,
    pub effective_ending_date_time: Option<String>,
    pub event_type: String,
    pub number_of_seats: u32,
    pub add_ons: Vec<AddOnSelection>,
    pub add_ons_total_cost: Decimal,
    pub status: String,
    pub full_package: bool,
    pub security_deposit_refunded: bool,
    pub tax_rate: Decimal,
    pub total_price: Decimal,
    pub price_computation_method: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, mi, 0).unwrap())
    }

    #[test]
    fn wire_datetime_uses_twelve_hour_clock() {
        assert_eq!(
            format_wire_datetime(datetime(2026, 9, 12, 18, 30)),
            "2026-09-12, 06:30 PM"
        );
        assert_eq!(
            format_wire_datetime(datetime(2026, 9, 13, 0, 5)),
            "2026-09-13, 12:05 AM"
        );
    }

    #[test]
    fn wire_datetime_round_trips() {
        let original = datetime(2026, 1, 31, 9, 0);
        let parsed = parse_wire_datetime(&format_wire_datetime(original));
        assert_eq!(parsed, Some(original));
    }

    #[test]
    fn input_datetime_parses_html_format() {
        assert_eq!(
            parse_input_datetime("2026-09-12T18:30"),
            Some(datetime(2026, 9, 12, 18, 30))
        );
        assert_eq!(parse_input_datetime("not a date"), None);
    }
}
