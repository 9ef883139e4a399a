//! The reservation form shell: owns the in-progress draft, recomputes the
//! price estimate on every field edit, and serializes the final payload for
//! submission. One instance per form; nothing here is shared.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::addon::{AddOn, AddOnSelection};
use crate::models::reservation::{
    format_wire_datetime, parse_wire_datetime, Reservation, ReservationPayload,
    COMPUTATION_METHOD_AUTO, STATUS_PENDING,
};
use crate::models::validation::{is_in_the_future, is_time_between_boundaries};
use crate::services::pricing::rates::{FacilityDefaults, RateTable, MAX_GUESTS};
use crate::services::pricing::{
    compute_subtotal, overtime, standard_tax_rate, EventTimes, OvertimeCharge, SeatCharge,
    SubtotalBreakdown,
};

/// Reservations may start between these times of day.
const EARLIEST_START: (u32, u32) = (9, 0);
const LATEST_START: (u32, u32) = (22, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// Untouched form.
    Empty,
    /// At least one field has been edited.
    Editing,
    /// A submission is outstanding; further submits are gated.
    Submitting,
}

#[derive(Debug)]
pub enum DraftError {
    AlreadySubmitting,
    Invalid(Vec<String>),
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::AlreadySubmitting => write!(f, "A submission is already in progress"),
            DraftError::Invalid(errors) => write!(f, "{}", errors.join("; ")),
        }
    }
}

impl std::error::Error for DraftError {}

/// A serialized draft ready to hand to the backend, tagged with a fresh
/// request id.
#[derive(Debug, Clone)]
pub struct Submission {
    pub request_id: Uuid,
    pub payload: ReservationPayload,
}

#[derive(Debug, Clone)]
pub struct ReservationDraft {
    id: Option<i64>,
    user_id: String,
    event_type: String,
    guest_count: Option<u32>,
    times: EventTimes,
    add_ons: Vec<AddOnSelection>,
    add_ons_total: Decimal,
    breakdown: SubtotalBreakdown,
    subtotal: Decimal,
    tax_rate: Decimal,
    tax: Decimal,
    total: Decimal,
    defaults: FacilityDefaults,
    phase: DraftPhase,
}

impl ReservationDraft {
    pub fn new(user_id: impl Into<String>, defaults: FacilityDefaults) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            event_type: String::new(),
            guest_count: None,
            times: EventTimes::default(),
            add_ons: Vec::new(),
            add_ons_total: Decimal::ZERO,
            breakdown: SubtotalBreakdown::default(),
            subtotal: Decimal::ZERO,
            tax_rate: standard_tax_rate(),
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            defaults,
            phase: DraftPhase::Empty,
        }
    }

    /// Pre-populate the form to edit an existing reservation. The breakdown
    /// is seeded from the rates the backend captured when it priced the
    /// reservation, and the subtotal is backed out of the stored total.
    pub fn from_reservation(reservation: &Reservation, defaults: FacilityDefaults) -> Self {
        let times = EventTimes {
            starting: parse_wire_datetime(&reservation.starting_date_time),
            ending: parse_wire_datetime(&reservation.ending_date_time),
            effective_ending: reservation
                .effective_ending_date_time
                .as_deref()
                .and_then(parse_wire_datetime),
        };

        // Degenerate stored tax rates must not panic the divide.
        let divisor = Decimal::ONE + reservation.tax_rate;
        let subtotal = if divisor.is_zero() {
            reservation.total_price
        } else {
            reservation.total_price / divisor
        };
        let tax = reservation.total_price - subtotal;

        let breakdown = match reservation.rates {
            Some(rates) => {
                let hours =
                    overtime::overtime_hours(times.starting, times.ending, times.effective_ending);
                SubtotalBreakdown {
                    add_ons_total: reservation.add_ons_total_cost,
                    facility_rental: rates.facility_rate,
                    facility_cleaning_fees: rates.cleaning_rate,
                    overtime: OvertimeCharge {
                        hours,
                        total_cost: hours * rates.overtime_rate,
                        overtime_rate: rates.overtime_rate,
                    },
                    seats: SeatCharge {
                        seats_count: reservation.number_of_seats,
                        seat_price: rates.seat_rate,
                        seat_rate_total: Decimal::from(reservation.number_of_seats)
                            * rates.seat_rate,
                    },
                }
            }
            None => SubtotalBreakdown::default(),
        };

        Self {
            id: reservation.id,
            user_id: reservation.user_id.clone(),
            event_type: reservation.event_type.clone(),
            guest_count: Some(reservation.number_of_seats),
            times,
            add_ons: reservation.add_ons.clone(),
            add_ons_total: reservation.add_ons_total_cost,
            breakdown,
            subtotal,
            tax_rate: reservation.tax_rate,
            tax,
            total: reservation.total_price,
            defaults,
            phase: DraftPhase::Editing,
        }
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == DraftPhase::Submitting
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn guest_count(&self) -> Option<u32> {
        self.guest_count
    }

    pub fn times(&self) -> EventTimes {
        self.times
    }

    pub fn add_ons(&self) -> &[AddOnSelection] {
        &self.add_ons
    }

    pub fn add_ons_total(&self) -> Decimal {
        self.add_ons_total
    }

    pub fn breakdown(&self) -> &SubtotalBreakdown {
        &self.breakdown
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn set_event_type(&mut self, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        self.event_type = value.into();
        self.touch();
    }

    /// Update the guest count. `None` models a cleared or non-numeric input;
    /// the recompute treats it as zero guests.
    pub fn set_guest_count(&mut self, value: Option<u32>, rates: &RateTable) {
        if self.is_submitting() {
            return;
        }
        self.guest_count = value;
        self.recompute(rates);
    }

    pub fn set_starting(&mut self, value: Option<NaiveDateTime>, rates: &RateTable) {
        if self.is_submitting() {
            return;
        }
        self.times.starting = value;
        self.recompute(rates);
    }

    pub fn set_ending(&mut self, value: Option<NaiveDateTime>, rates: &RateTable) {
        if self.is_submitting() {
            return;
        }
        self.times.ending = value;
        self.recompute(rates);
    }

    pub fn set_effective_ending(&mut self, value: Option<NaiveDateTime>, rates: &RateTable) {
        if self.is_submitting() {
            return;
        }
        self.times.effective_ending = value;
        self.recompute(rates);
    }

    /// Set the desired quantity for an add-on. A quantity of zero removes the
    /// selection entirely.
    pub fn set_add_on_quantity(&mut self, add_on: &AddOn, quantity: u32, rates: &RateTable) {
        if self.is_submitting() {
            return;
        }

        let existing = self
            .add_ons
            .iter()
            .position(|selection| selection.add_on.name == add_on.name);

        match (existing, quantity) {
            (Some(index), 0) => {
                self.add_ons.remove(index);
            }
            (Some(index), quantity) => {
                self.add_ons[index].quantity = quantity;
            }
            (None, 0) => {}
            (None, quantity) => self.add_ons.push(AddOnSelection {
                add_on: add_on.clone(),
                quantity,
            }),
        }

        self.add_ons_total = self
            .add_ons
            .iter()
            .map(|selection| selection.add_on.price * Decimal::from(selection.quantity))
            .sum();

        self.recompute(rates);
    }

    /// Re-run the pricing engine and re-derive tax and total. Keeps every
    /// displayed derived value consistent after a single-field edit.
    fn recompute(&mut self, rates: &RateTable) {
        let quote = compute_subtotal(
            self.add_ons_total,
            self.guest_count.unwrap_or(0),
            self.times,
            rates,
            &self.defaults,
        );
        self.subtotal = quote.subtotal;
        self.breakdown = quote.breakdown;
        self.tax = self.subtotal * self.tax_rate;
        self.total = self.subtotal + self.tax;
        self.touch();
    }

    fn touch(&mut self) {
        if self.phase == DraftPhase::Empty {
            self.phase = DraftPhase::Editing;
        }
    }

    /// Field validation mirroring the form's submission rules.
    pub fn validate(&self, now: NaiveDateTime) -> Vec<String> {
        let mut errors = Vec::new();

        if self.event_type.trim().is_empty() {
            errors.push("Event type is required".to_string());
        }

        match self.guest_count {
            None | Some(0) => errors.push("Guest count is required".to_string()),
            Some(count) if count > MAX_GUESTS => {
                errors.push("The facility maximum seats capacity is 200".to_string())
            }
            Some(_) => {}
        }

        match self.times.starting {
            Some(starting) => {
                if !is_in_the_future(starting, now) {
                    errors.push("Date and time must be in the future".to_string());
                }
                if !is_time_between_boundaries(starting, EARLIEST_START, LATEST_START) {
                    errors.push("Time must be between 9:00 AM and 10:00 PM".to_string());
                }
            }
            None => errors.push("Starting date and time are required".to_string()),
        }

        match (self.times.starting, self.times.ending) {
            (_, None) => errors.push("Ending date and time are required".to_string()),
            (Some(starting), Some(ending)) if ending <= starting => errors.push(
                "Ending date and time must be after the starting date and time".to_string(),
            ),
            _ => {}
        }

        if let (Some(starting), Some(effective)) =
            (self.times.starting, self.times.effective_ending)
        {
            if effective <= starting {
                errors.push(
                    "Effective ending date and time must be after the starting date and time"
                        .to_string(),
                );
            }
        }

        errors
    }

    /// Validate and serialize the draft, moving it to `Submitting`. Fails
    /// without side effects when a submission is already outstanding or the
    /// fields do not validate.
    pub fn begin_submit(&mut self, now: NaiveDateTime) -> Result<Submission, DraftError> {
        if self.is_submitting() {
            return Err(DraftError::AlreadySubmitting);
        }

        let errors = self.validate(now);
        if !errors.is_empty() {
            return Err(DraftError::Invalid(errors));
        }

        let payload = ReservationPayload {
            id: self.id,
            user_id: self.user_id.clone(),
            starting_date_time: self
                .times
                .starting
                .map(format_wire_datetime)
                .unwrap_or_default(),
            ending_date_time: self
                .times
                .ending
                .map(format_wire_datetime)
                .unwrap_or_default(),
            effective_ending_date_time: self.times.effective_ending.map(format_wire_datetime),
            event_type: self.event_type.clone(),
            number_of_seats: self.guest_count.unwrap_or(0),
            add_ons: self.add_ons.clone(),
            add_ons_total_cost: self.add_ons_total,
            status: STATUS_PENDING.to_string(),
            full_package: false,
            security_deposit_refunded: false,
            tax_rate: self.tax_rate,
            total_price: self.total,
            price_computation_method: COMPUTATION_METHOD_AUTO.to_string(),
        };

        self.phase = DraftPhase::Submitting;
        Ok(Submission {
            request_id: Uuid::new_v4(),
            payload,
        })
    }

    /// The backend accepted the submission: discard the draft.
    pub fn submit_succeeded(&mut self) {
        let user_id = std::mem::take(&mut self.user_id);
        *self = Self::new(user_id, self.defaults);
    }

    /// The backend rejected the submission (scheduling conflict, validation):
    /// keep every field the user entered and re-enable the form.
    pub fn submit_failed(&mut self) {
        self.phase = DraftPhase::Editing;
    }

    /// Cancel authoring and return to the pristine state.
    pub fn reset(&mut self) {
        self.submit_succeeded();
    }
}
