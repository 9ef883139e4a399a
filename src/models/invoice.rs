use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::reservation::Reservation;

pub const INVOICE_STATUS_PAID: &str = "Paid";
pub const INVOICE_STATUS_DUE: &str = "Due";
pub const INVOICE_STATUS_OVERDUE: &str = "Overdue";
pub const INVOICE_STATUS_PARTIALLY_PAID: &str = "Partially Paid";
pub const INVOICE_STATUS_WITHDRAWN: &str = "Withdrawn";

/// An invoice issued by the backend for a reservation. Read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    #[serde(default)]
    pub issued_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    pub status: String,
    // The backend wire format misspells these keys.
    #[serde(rename = "amoutDue")]
    pub amount_due: Decimal,
    #[serde(rename = "amoutPaid")]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub reservation: Option<Reservation>,
}
