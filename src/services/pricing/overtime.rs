use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// 3:00 AM on the calendar day after the event's start. Overtime billing
/// begins only past this point.
pub fn billing_cutoff(start: NaiveDateTime) -> NaiveDateTime {
    (start.date() + Duration::days(1))
        .and_time(NaiveTime::from_hms_opt(3, 0, 0).expect("3:00 AM is a valid time"))
}

/// Billable overtime hours for a reservation.
///
/// The branching is deliberately asymmetric and must stay that way:
/// - declared end before the cutoff: only an actual (effective) ending past
///   the cutoff bills, from the cutoff to the actual ending;
/// - declared end at or past the cutoff: an actual ending later than the
///   declared one bills from the cutoff to the actual ending; with no actual
///   ending recorded the declared one bills from the cutoff; an actual ending
///   at or before the declared one waives the overtime entirely.
pub fn overtime_hours(
    start: Option<NaiveDateTime>,
    declared_end: Option<NaiveDateTime>,
    effective_end: Option<NaiveDateTime>,
) -> Decimal {
    let (start, declared_end) = match (start, declared_end) {
        (Some(start), Some(declared_end)) => (start, declared_end),
        _ => return Decimal::ZERO,
    };
    let cutoff = billing_cutoff(start);

    if declared_end < cutoff {
        match effective_end {
            Some(actual) if actual > cutoff => hours_past(cutoff, actual),
            _ => Decimal::ZERO,
        }
    } else {
        match effective_end {
            Some(actual) if actual > declared_end => hours_past(cutoff, actual),
            Some(_) => Decimal::ZERO,
            None => hours_past(cutoff, declared_end),
        }
    }
}

/// Fractional hours between the cutoff and a later time, millisecond-based.
/// Not rounded; display code rounds to 2 decimals.
fn hours_past(cutoff: NaiveDateTime, later: NaiveDateTime) -> Decimal {
    let millis = (later - cutoff).num_milliseconds();
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn cutoff_is_three_am_next_day() {
        assert_eq!(billing_cutoff(datetime(5, 18, 0)), datetime(6, 3, 0));
        // Starting past midnight still pushes the cutoff a full day out.
        assert_eq!(billing_cutoff(datetime(6, 0, 30)), datetime(7, 3, 0));
    }

    #[test]
    fn no_overtime_when_declared_end_before_cutoff() {
        // Start day D 18:00, declared end day D+1 01:00, no effective end.
        let hours = overtime_hours(Some(datetime(5, 18, 0)), Some(datetime(6, 1, 0)), None);
        assert_eq!(hours, Decimal::ZERO);
    }

    #[test]
    fn effective_end_past_cutoff_bills_even_when_declared_end_did_not() {
        // Declared end 01:00 is before the 03:00 cutoff, but the event
        // actually ran until 04:00: one billable hour, from 03:00 to 04:00.
        let hours = overtime_hours(
            Some(datetime(5, 18, 0)),
            Some(datetime(6, 1, 0)),
            Some(datetime(6, 4, 0)),
        );
        assert_eq!(hours, Decimal::from(1));
    }

    #[test]
    fn declared_end_past_cutoff_bills_without_effective_end() {
        let hours = overtime_hours(Some(datetime(5, 18, 0)), Some(datetime(6, 4, 0)), None);
        assert_eq!(hours, Decimal::from(1));
    }

    #[test]
    fn effective_end_later_than_declared_bills_from_cutoff() {
        let hours = overtime_hours(
            Some(datetime(5, 18, 0)),
            Some(datetime(6, 4, 0)),
            Some(datetime(6, 5, 30)),
        );
        assert_eq!(hours, Decimal::new(25, 1)); // 2.5 hours past 03:00
    }

    #[test]
    fn effective_end_before_declared_waives_overtime() {
        // Declared past the cutoff but the recorded actual ending is earlier
        // than declared: the overtime is waived, not billed on the declared
        // schedule.
        let hours = overtime_hours(
            Some(datetime(5, 18, 0)),
            Some(datetime(6, 4, 0)),
            Some(datetime(6, 3, 30)),
        );
        assert_eq!(hours, Decimal::ZERO);
    }

    #[test]
    fn fractional_hours_are_preserved() {
        let hours = overtime_hours(Some(datetime(5, 18, 0)), Some(datetime(6, 3, 45)), None);
        assert_eq!(hours, Decimal::new(75, 2)); // 45 minutes
    }

    #[test]
    fn missing_times_yield_zero() {
        assert_eq!(
            overtime_hours(None, Some(datetime(6, 4, 0)), None),
            Decimal::ZERO
        );
        assert_eq!(
            overtime_hours(Some(datetime(5, 18, 0)), None, Some(datetime(6, 4, 0))),
            Decimal::ZERO
        );
    }
}
