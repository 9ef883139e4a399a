//! Client-side reservation pricing: resolves the applicable facility rates,
//! bills overtime past the 3:00 AM cutoff, and composes the itemized subtotal
//! the booking form displays while the user edits. The backend recomputes the
//! authoritative price on submission; this estimate must simply stay
//! self-consistent and deterministic.

pub mod overtime;
pub mod rates;

use chrono::{Datelike, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::rates::{resolve_cleaning_fee, resolve_facility_rate, FacilityDefaults, RateTable};

/// Sales tax applied on top of the subtotal.
pub fn standard_tax_rate() -> Decimal {
    Decimal::new(7, 2) // 7%
}

/// The three datetimes a reservation is priced against. Any of them may be
/// unset while the user is still filling the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTimes {
    pub starting: Option<NaiveDateTime>,
    pub ending: Option<NaiveDateTime>,
    pub effective_ending: Option<NaiveDateTime>,
}

impl EventTimes {
    pub fn start_day(&self) -> Option<Weekday> {
        self.starting.map(|start| start.weekday())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeCharge {
    pub hours: Decimal,
    pub total_cost: Decimal,
    pub overtime_rate: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatCharge {
    pub seats_count: u32,
    pub seat_price: Decimal,
    pub seat_rate_total: Decimal,
}

/// The itemized decomposition of the subtotal, recreated on every recompute
/// and rendered line by line next to the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtotalBreakdown {
    pub add_ons_total: Decimal,
    pub facility_rental: Decimal,
    pub facility_cleaning_fees: Decimal,
    pub overtime: OvertimeCharge,
    pub seats: SeatCharge,
}

impl SubtotalBreakdown {
    /// Sum of the line items. Always equals the quoted subtotal.
    pub fn total(&self) -> Decimal {
        self.add_ons_total
            + self.facility_rental
            + self.facility_cleaning_fees
            + self.overtime.total_cost
            + self.seats.seat_rate_total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub subtotal: Decimal,
    pub breakdown: SubtotalBreakdown,
}

/// Compose the subtotal and its breakdown from the current form state.
///
/// Pure and deterministic: identical inputs produce an identical quote, and
/// the breakdown is returned rather than published through a side channel.
/// Missing rates resolve through the explicit fallbacks in [`rates`]; the
/// engine never fails to produce a number.
pub fn compute_subtotal(
    add_ons_total: Decimal,
    guest_count: u32,
    times: EventTimes,
    rates: &RateTable,
    defaults: &FacilityDefaults,
) -> Quote {
    let facility_rental = resolve_facility_rate(times.start_day(), rates);
    let facility_cleaning_fees = resolve_cleaning_fee(guest_count, rates);

    let seat_price = rates.seat.unwrap_or(defaults.seat_rate);
    let seat_rate_total = Decimal::from(guest_count) * seat_price;

    let overtime_rate = rates.overtime_hourly.unwrap_or(defaults.overtime_rate);
    let hours = overtime::overtime_hours(times.starting, times.ending, times.effective_ending);
    let overtime_cost = hours * overtime_rate;

    let breakdown = SubtotalBreakdown {
        add_ons_total,
        facility_rental,
        facility_cleaning_fees,
        overtime: OvertimeCharge {
            hours,
            total_cost: overtime_cost,
            overtime_rate,
        },
        seats: SeatCharge {
            seats_count: guest_count,
            seat_price,
            seat_rate_total,
        },
    };

    Quote {
        subtotal: add_ons_total
            + seat_rate_total
            + overtime_cost
            + facility_rental
            + facility_cleaning_fees,
        breakdown,
    }
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

    fn full_table() -> RateTable {
        RateTable {
            regular_facility: Some(Decimal::from(350)),
            saturday_facility: Some(Decimal::from(500)),
            cleaning_small_party: Some(Decimal::from(80)),
            cleaning_large_party: Some(Decimal::from(150)),
            seat: Some(Decimal::from(10)),
            overtime_hourly: Some(Decimal::from(100)),
        }
    }

    // 2026-06-06 is a Saturday.
    fn saturday_times() -> EventTimes {
        EventTimes {
            starting: Some(datetime(2026, 6, 6, 18, 0)),
            ending: Some(datetime(2026, 6, 6, 23, 0)),
            effective_ending: None,
        }
    }

    #[test]
    fn worked_example_large_saturday_party() {
        // 120 guests on a Saturday, $200 of add-ons, no overtime:
        // 200 + 120 * 10 + 500 + 150 = 2050.
        let quote = compute_subtotal(
            Decimal::from(200),
            120,
            saturday_times(),
            &full_table(),
            &FacilityDefaults::default(),
        );

        assert_eq!(quote.subtotal, Decimal::from(2050));
        assert_eq!(quote.breakdown.facility_rental, Decimal::from(500));
        assert_eq!(quote.breakdown.facility_cleaning_fees, Decimal::from(150));
        assert_eq!(quote.breakdown.seats.seat_rate_total, Decimal::from(1200));
        assert_eq!(quote.breakdown.overtime.total_cost, Decimal::ZERO);

        // Tax at 7% on top.
        let tax = quote.subtotal * standard_tax_rate();
        assert_eq!(quote.subtotal + tax, Decimal::new(219350, 2));
    }

    #[test]
    fn subtotal_always_equals_breakdown_sum() {
        let rates = full_table();
        let defaults = FacilityDefaults::default();
        let times = EventTimes {
            starting: Some(datetime(2026, 6, 5, 18, 0)),
            ending: Some(datetime(2026, 6, 6, 4, 30)),
            effective_ending: Some(datetime(2026, 6, 6, 5, 0)),
        };

        for guest_count in [0, 1, 99, 100, 101, 200] {
            let quote =
                compute_subtotal(Decimal::new(12345, 2), guest_count, times, &rates, &defaults);
            assert_eq!(quote.subtotal, quote.breakdown.total());
        }
    }

    #[test]
    fn recompute_is_deterministic() {
        let rates = full_table();
        let defaults = FacilityDefaults::default();
        let times = saturday_times();

        let first = compute_subtotal(Decimal::from(75), 42, times, &rates, &defaults);
        let second = compute_subtotal(Decimal::from(75), 42, times, &rates, &defaults);
        assert_eq!(first.subtotal, second.subtotal);
        assert_eq!(first.breakdown, second.breakdown);
    }

    #[test]
    fn missing_seat_and_overtime_rates_use_defaults() {
        let rates = RateTable {
            seat: None,
            overtime_hourly: None,
            ..full_table()
        };
        let defaults = FacilityDefaults::default();

        // Declared end one hour past the cutoff.
        let times = EventTimes {
            starting: Some(datetime(2026, 6, 5, 18, 0)),
            ending: Some(datetime(2026, 6, 6, 4, 0)),
            effective_ending: None,
        };

        let quote = compute_subtotal(Decimal::ZERO, 10, times, &rates, &defaults);
        assert_eq!(quote.breakdown.seats.seat_price, defaults.seat_rate);
        assert_eq!(
            quote.breakdown.overtime.overtime_rate,
            defaults.overtime_rate
        );
        assert_eq!(quote.breakdown.overtime.total_cost, defaults.overtime_rate);
    }

    #[test]
    fn empty_form_quotes_large_party_cleaning_and_saturday_rate() {
        // Nothing filled in yet: the defensive fallbacks price the blank form
        // with the Saturday facility rate and large-party cleaning fee.
        let quote = compute_subtotal(
            Decimal::ZERO,
            0,
            EventTimes::default(),
            &full_table(),
            &FacilityDefaults::default(),
        );
        assert_eq!(quote.breakdown.facility_rental, Decimal::from(500));
        assert_eq!(quote.breakdown.facility_cleaning_fees, Decimal::from(150));
        assert_eq!(quote.subtotal, Decimal::from(650));
    }
}
