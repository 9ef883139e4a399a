use chrono::Weekday;
use rust_decimal::Decimal;

use crate::models::addon::AddOn;

// Catalog entries carrying the facility rates, matched by exact name.
pub const REGULAR_FACILITY_RATE_NAME: &str = "Regular Facility Rate";
pub const SATURDAY_FACILITY_RATE_NAME: &str = "Saturday Facility Rate";
pub const CLEANING_FEES_SMALL_PARTY_NAME: &str = "Cleaning Fees - Small Party";
pub const CLEANING_FEES_LARGE_PARTY_NAME: &str = "Cleaning Fees - Large Party";
pub const SEAT_RATE_NAME: &str = "Seat Rate";
pub const OVERTIME_HOURLY_RATE_NAME: &str = "Overtime Hourly Rate";

/// Parties of at most this many guests get the small-party cleaning fee.
pub const SMALL_PARTY_MAX_GUESTS: u32 = 100;

/// The facility's seating capacity.
pub const MAX_GUESTS: u32 = 200;

/// Facility rates extracted from the backend add-on catalog. A `None` means
/// the catalog did not carry the entry; resolution then falls back to an
/// explicit default rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateTable {
    pub regular_facility: Option<Decimal>,
    pub saturday_facility: Option<Decimal>,
    pub cleaning_small_party: Option<Decimal>,
    pub cleaning_large_party: Option<Decimal>,
    pub seat: Option<Decimal>,
    pub overtime_hourly: Option<Decimal>,
}

impl RateTable {
    /// Build the table from the fetched catalog, matching rate entries by
    /// exact name. Immutable once built for the session.
    pub fn from_catalog(catalog: &[AddOn]) -> Self {
        Self {
            regular_facility: named_price(catalog, REGULAR_FACILITY_RATE_NAME),
            saturday_facility: named_price(catalog, SATURDAY_FACILITY_RATE_NAME),
            cleaning_small_party: named_price(catalog, CLEANING_FEES_SMALL_PARTY_NAME),
            cleaning_large_party: named_price(catalog, CLEANING_FEES_LARGE_PARTY_NAME),
            seat: named_price(catalog, SEAT_RATE_NAME),
            overtime_hourly: named_price(catalog, OVERTIME_HOURLY_RATE_NAME),
        }
    }
}

fn named_price(catalog: &[AddOn], name: &str) -> Option<Decimal> {
    catalog
        .iter()
        .find(|add_on| add_on.name == name)
        .map(|add_on| add_on.price)
}

/// Fallback constants for rates the catalog may not carry, overridable from
/// the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityDefaults {
    pub seat_rate: Decimal,
    pub overtime_rate: Decimal,
}

impl Default for FacilityDefaults {
    fn default() -> Self {
        Self {
            seat_rate: Decimal::from(10),
            overtime_rate: Decimal::from(100),
        }
    }
}

impl FacilityDefaults {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            seat_rate: std::env::var("SEAT_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.seat_rate),
            overtime_rate: std::env::var("OVERTIME_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.overtime_rate),
        }
    }
}

/// Pick the facility rental rate for the event's start day. The regular rate
/// applies only when the day is known, both rates are present, and the day is
/// not Saturday; every other case resolves to the Saturday rate (zero when
/// the catalog carries neither).
pub fn resolve_facility_rate(day: Option<Weekday>, rates: &RateTable) -> Decimal {
    match (rates.regular_facility, rates.saturday_facility, day) {
        (Some(regular), Some(_), Some(day)) if day != Weekday::Sat => regular,
        _ => rates.saturday_facility.unwrap_or(Decimal::ZERO),
    }
}

/// Pick the cleaning fee tier for the guest count. The small-party fee
/// applies only when both tiers are present and the count is positive and at
/// most [`SMALL_PARTY_MAX_GUESTS`]; every other case resolves to the
/// large-party fee (zero when the catalog carries neither).
pub fn resolve_cleaning_fee(guest_count: u32, rates: &RateTable) -> Decimal {
    match (rates.cleaning_small_party, rates.cleaning_large_party) {
        (Some(small), Some(_)) if guest_count > 0 && guest_count <= SMALL_PARTY_MAX_GUESTS => small,
        _ => rates.cleaning_large_party.unwrap_or(Decimal::ZERO),
    }
}
