//! Receipt model and filter types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// How a receipt was settled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Credit,
    Recovery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Recovery => "recovery",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "credit" => Ok(PaymentMethod::Credit),
            "recovery" => Ok(PaymentMethod::Recovery),
            other => Err(anyhow::anyhow!("Invalid payment method: {}", other)),
        }
    }
}

/// Lifecycle tag of a receipt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Completed,
    Pending,
    Overdue,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Completed => "completed",
            ReceiptStatus::Pending => "pending",
            ReceiptStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceiptStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ReceiptStatus::Completed),
            "pending" => Ok(ReceiptStatus::Pending),
            "overdue" => Ok(ReceiptStatus::Overdue),
            other => Err(anyhow::anyhow!("Invalid status: {}", other)),
        }
    }
}

/// Payment receipt.
///
/// Field names serialize in camelCase; that is the wire contract the browser
/// client was built against. Amounts serialize as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: Uuid,
    pub receipt_number: String,
    pub datetime: DateTime<Utc>,
    pub entity: String,
    pub vehicle: Option<String>,
    pub staff: String,
    pub branch: String,
    pub payment_method: PaymentMethod,
    pub credit_amount: Decimal,
    pub recovery_amount: Decimal,
    pub total_amount: Decimal,
    pub outstanding_amount: Decimal,
    pub status: ReceiptStatus,
    pub salesman_name: String,
    pub salesman_photo: Option<String>,
    pub salesman_message: Option<String>,
    pub receipt_photos: Vec<String>,
}

/// Input for creating a receipt.
///
/// Required fields are `Option` here; presence is checked at the store
/// boundary together with the enum and amount validation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReceipt {
    pub receipt_number: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub entity: Option<String>,
    pub vehicle: Option<String>,
    pub staff: Option<String>,
    pub branch: Option<String>,
    pub payment_method: Option<String>,
    pub credit_amount: Option<Decimal>,
    pub recovery_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub outstanding_amount: Option<Decimal>,
    pub status: Option<String>,
    pub salesman_name: Option<String>,
    #[validate(url(message = "salesmanPhoto must be a URL"))]
    pub salesman_photo: Option<String>,
    pub salesman_message: Option<String>,
    pub receipt_photos: Option<Vec<String>>,
}

/// Filter parameters for listing receipts.
///
/// `paymentMethod`, `status` and `entity` accept the sentinel `all`, which is
/// equivalent to omitting the field. Values are kept as raw strings: an
/// out-of-enum filter value matches nothing rather than erroring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptFilter {
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub entity: Option<String>,
}

impl ReceiptFilter {
    /// A free-text term: present and non-empty.
    pub(crate) fn term(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// A dropdown selection: present, non-empty and not the `all` sentinel.
    pub(crate) fn selection(value: &Option<String>) -> Option<&str> {
        Self::term(value).filter(|v| *v != "all")
    }
}
