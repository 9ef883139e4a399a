use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::addon::{AddOn, AddOnSelection};
use crate::models::reservation::parse_input_datetime;
use crate::routes::backend_failure;
use crate::services::backend::BackendClient;
use crate::services::draft::{DraftError, ReservationDraft};
use crate::services::pricing::rates::{FacilityDefaults, RateTable};
use crate::services::pricing::SubtotalBreakdown;

/// Draft fields as the form holds them: HTML datetime-local strings, add-on
/// selections, maybe-empty guest count. Everything optional so a quote can be
/// computed at any point while the customer is still filling things in.
/// Derived values (totals, tax) are never accepted from the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub number_of_seats: Option<u32>,
    #[serde(default)]
    pub starting_date_time: Option<String>,
    #[serde(default)]
    pub ending_date_time: Option<String>,
    #[serde(default)]
    pub effective_ending_date_time: Option<String>,
    #[serde(default)]
    pub add_ons: Vec<AddOnSelection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub add_ons_total_cost: Decimal,
    pub subtotal_break_down: SubtotalBreakdown,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BulkCancelRequest {
    pub ids: Vec<i64>,
}

/// Feed the submitted field state through the form shell so every derived
/// value is recomputed server-side. Add-on prices always come from the
/// catalog; selections naming unknown add-ons are dropped.
fn build_draft(
    user_id: String,
    request: ReservationRequest,
    catalog: &[AddOn],
) -> ReservationDraft {
    let rates = RateTable::from_catalog(catalog);
    let mut draft = ReservationDraft::new(user_id, FacilityDefaults::from_env());

    draft.set_event_type(request.event_type);
    draft.set_guest_count(request.number_of_seats, &rates);
    draft.set_starting(
        request
            .starting_date_time
            .as_deref()
            .and_then(parse_input_datetime),
        &rates,
    );
    draft.set_ending(
        request
            .ending_date_time
            .as_deref()
            .and_then(parse_input_datetime),
        &rates,
    );
    draft.set_effective_ending(
        request
            .effective_ending_date_time
            .as_deref()
            .and_then(parse_input_datetime),
        &rates,
    );

    for selection in request.add_ons {
        if let Some(add_on) = catalog
            .iter()
            .find(|entry| entry.name == selection.add_on.name)
        {
            draft.set_add_on_quantity(add_on, selection.quantity, &rates);
        }
    }

    draft
}

// Price a draft reservation without persisting anything
pub async fn quote(
    data: web::Data<Arc<BackendClient>>,
    input: web::Json<ReservationRequest>,
) -> impl Responder {
    let backend = data.into_inner();
    let catalog = match backend.get_add_ons().await {
        Ok(catalog) => catalog,
        Err(err) => return backend_failure(err),
    };

    let draft = build_draft(String::new(), input.into_inner(), &catalog);

    HttpResponse::Ok().json(QuoteResponse {
        add_ons_total_cost: draft.add_ons_total(),
        subtotal_break_down: *draft.breakdown(),
        subtotal: draft.subtotal(),
        tax_rate: draft.tax_rate(),
        tax: draft.tax(),
        total_price: draft.total(),
    })
}

// Submit a new reservation on behalf of the signed-in user
pub async fn create(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    input: web::Json<ReservationRequest>,
) -> impl Responder {
    let backend = data.into_inner();
    let catalog = match backend.get_add_ons().await {
        Ok(catalog) => catalog,
        Err(err) => return backend_failure(err),
    };

    let mut draft = build_draft(claims.sub.clone(), input.into_inner(), &catalog);
    let submission = match draft.begin_submit(Utc::now().naive_utc()) {
        Ok(submission) => submission,
        Err(DraftError::Invalid(errors)) => {
            return HttpResponse::BadRequest().json(json!({ "errors": errors }))
        }
        Err(DraftError::AlreadySubmitting) => return HttpResponse::Conflict().finish(),
    };

    match backend
        .create_reservation(&submission.payload, submission.request_id)
        .await
    {
        Ok(reservation) => HttpResponse::Created().json(reservation),
        Err(err) => backend_failure(err),
    }
}

pub async fn update(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    path: web::Path<i64>,
    input: web::Json<ReservationRequest>,
) -> impl Responder {
    let backend = data.into_inner();
    let reservation_id = path.into_inner();
    let catalog = match backend.get_add_ons().await {
        Ok(catalog) => catalog,
        Err(err) => return backend_failure(err),
    };

    let mut draft = build_draft(claims.sub.clone(), input.into_inner(), &catalog);
    let mut submission = match draft.begin_submit(Utc::now().naive_utc()) {
        Ok(submission) => submission,
        Err(DraftError::Invalid(errors)) => {
            return HttpResponse::BadRequest().json(json!({ "errors": errors }))
        }
        Err(DraftError::AlreadySubmitting) => return HttpResponse::Conflict().finish(),
    };
    submission.payload.id = Some(reservation_id);

    match backend
        .update_reservation(
            &claims.sub,
            reservation_id,
            &submission.payload,
            submission.request_id,
        )
        .await
    {
        Ok(reservation) => HttpResponse::Ok().json(reservation),
        Err(err) => backend_failure(err),
    }
}

pub async fn cancel(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    path: web::Path<i64>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend
        .cancel_reservation(&claims.sub, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => backend_failure(err),
    }
}

// Cancel several of the user's reservations in one call
pub async fn cancel_many(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    input: web::Json<BulkCancelRequest>,
) -> impl Responder {
    let backend = data.into_inner();
    let request = input.into_inner();

    if request.ids.is_empty() {
        return HttpResponse::BadRequest().body("No reservation ids provided");
    }

    match backend.cancel_reservations(&claims.sub, &request.ids).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => backend_failure(err),
    }
}

pub async fn user_reservations(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend.user_reservations(&claims.sub).await {
        Ok(reservations) => HttpResponse::Ok().json(reservations),
        Err(err) => backend_failure(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::services::pricing::rates::{
        CLEANING_FEES_LARGE_PARTY_NAME, CLEANING_FEES_SMALL_PARTY_NAME, OVERTIME_HOURLY_RATE_NAME,
        REGULAR_FACILITY_RATE_NAME, SATURDAY_FACILITY_RATE_NAME, SEAT_RATE_NAME,
    };

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, mi, 0).unwrap())
    }

    fn rate_entry(name: &str, price: i64) -> AddOn {
        AddOn {
            id: None,
            name: name.to_string(),
            price: Decimal::from(price),
            category: Some("Rates".to_string()),
            description: None,
        }
    }

    fn catalog() -> Vec<AddOn> {
        vec![
            rate_entry(REGULAR_FACILITY_RATE_NAME, 350),
            rate_entry(SATURDAY_FACILITY_RATE_NAME, 500),
            rate_entry(CLEANING_FEES_SMALL_PARTY_NAME, 80),
            rate_entry(CLEANING_FEES_LARGE_PARTY_NAME, 150),
            rate_entry(SEAT_RATE_NAME, 10),
            rate_entry(OVERTIME_HOURLY_RATE_NAME, 100),
            AddOn {
                id: Some(7),
                name: "Decoration Package".to_string(),
                price: Decimal::from(100),
                category: Some("Decor".to_string()),
                description: None,
            },
        ]
    }

    #[test]
    fn client_supplied_totals_are_ignored_and_recomputed() {
        // The client claims a zero total and a tampered add-on price; the
        // submission carries the server-side recomputation instead.
        let request: ReservationRequest = serde_json::from_value(json!({
            "eventType": "Wedding",
            "numberOfSeats": 120,
            "startingDateTime": "2026-06-06T18:00",
            "endingDateTime": "2026-06-06T23:00",
            "addOns": [
                { "addOn": { "name": "Decoration Package", "price": 1 }, "quantity": 2 }
            ],
            "totalPrice": 0,
            "taxRate": 0
        }))
        .unwrap();

        let mut draft = build_draft("user-1".to_string(), request, &catalog());
        let submission = draft.begin_submit(datetime(2026, 6, 1, 12, 0)).unwrap();

        assert_eq!(submission.payload.user_id, "user-1");
        assert_eq!(submission.payload.add_ons_total_cost, Decimal::from(200));
        assert_eq!(submission.payload.total_price, Decimal::new(219350, 2));
        assert_eq!(submission.payload.starting_date_time, "2026-06-06, 06:00 PM");
        assert_eq!(submission.payload.ending_date_time, "2026-06-06, 11:00 PM");
    }

    #[test]
    fn invalid_fields_fail_submission_with_messages() {
        let request: ReservationRequest = serde_json::from_value(json!({
            "eventType": "Wedding",
            "numberOfSeats": 300,
            "startingDateTime": "2026-06-06T18:00",
            "endingDateTime": "2026-06-06T17:00"
        }))
        .unwrap();

        let mut draft = build_draft("user-1".to_string(), request, &catalog());
        match draft.begin_submit(datetime(2026, 6, 1, 12, 0)) {
            Err(DraftError::Invalid(errors)) => {
                assert!(errors
                    .iter()
                    .any(|e| e == "The facility maximum seats capacity is 200"));
                assert!(errors
                    .iter()
                    .any(|e| e.contains("after the starting date and time")));
            }
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn selections_not_in_the_catalog_are_dropped() {
        let request: ReservationRequest = serde_json::from_value(json!({
            "addOns": [
                { "addOn": { "name": "Not In Catalog", "price": 500 }, "quantity": 3 }
            ]
        }))
        .unwrap();

        let draft = build_draft(String::new(), request, &catalog());
        assert!(draft.add_ons().is_empty());
        assert_eq!(draft.add_ons_total(), Decimal::ZERO);
    }
}
