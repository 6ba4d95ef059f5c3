//! In-memory storage engine for receipts and schedules.
//!
//! The store is the single source of truth for both collections and the
//! place where input validation happens: enum membership, required fields,
//! amount signs and receipt-number uniqueness are all checked here before
//! anything is written. Handlers only adapt HTTP to these calls.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    CreateReceipt, CreateSchedule, ExportFormat, PaymentMethod, Receipt, ReceiptFilter,
    ReceiptStatus, Schedule, ScheduleFrequency, UpdateSchedule,
};
use crate::services::metrics::{RECEIPTS_TOTAL, SCHEDULES_TOTAL, STORE_OP_DURATION};

/// Storage contract for receipts and schedules.
///
/// `MemoryStore` is the only implementation today; the trait is the seam a
/// durable backend would plug into without touching the handlers.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    async fn list_receipts(&self, filter: &ReceiptFilter) -> Result<Vec<Receipt>, AppError>;
    async fn get_receipt(&self, id: Uuid) -> Result<Option<Receipt>, AppError>;
    async fn create_receipt(&self, input: CreateReceipt) -> Result<Receipt, AppError>;
    async fn update_receipt_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Receipt>, AppError>;

    async fn list_schedules(&self) -> Result<Vec<Schedule>, AppError>;
    async fn create_schedule(&self, input: CreateSchedule) -> Result<Schedule, AppError>;
    async fn update_schedule(
        &self,
        id: Uuid,
        input: UpdateSchedule,
    ) -> Result<Option<Schedule>, AppError>;
    async fn delete_schedule(&self, id: Uuid) -> Result<bool, AppError>;
}

/// In-memory `ReceiptStore`.
///
/// Both collections live behind one `RwLock`; writers hold the guard across
/// the whole read-modify-write, so updates are atomic per record and every
/// mutation is visible to the next read.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    receipts: Vec<Receipt>,
    schedules: Vec<Schedule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the built-in demo data set.
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        for input in demo_receipts() {
            self.create_receipt(input).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn list_receipts(&self, filter: &ReceiptFilter) -> Result<Vec<Receipt>, AppError> {
        let timer = STORE_OP_DURATION
            .with_label_values(&["list_receipts"])
            .start_timer();

        let date_from = ReceiptFilter::term(&filter.date_from)
            .map(|value| parse_date_bound("dateFrom", value))
            .transpose()?;
        let date_to = ReceiptFilter::term(&filter.date_to)
            .map(|value| parse_date_bound("dateTo", value))
            .transpose()?;
        let search = ReceiptFilter::term(&filter.search).map(str::to_lowercase);
        let payment_method = ReceiptFilter::selection(&filter.payment_method);
        let status = ReceiptFilter::selection(&filter.status);
        let entity = ReceiptFilter::selection(&filter.entity);

        let inner = self.inner.read().await;
        let mut matches: Vec<Receipt> = inner
            .receipts
            .iter()
            .filter(|receipt| {
                if let Some(term) = &search {
                    let hit = receipt.receipt_number.to_lowercase().contains(term)
                        || receipt.entity.to_lowercase().contains(term)
                        || receipt.staff.to_lowercase().contains(term)
                        || receipt
                            .vehicle
                            .as_deref()
                            .is_some_and(|v| v.to_lowercase().contains(term));
                    if !hit {
                        return false;
                    }
                }
                if let Some(from) = date_from {
                    if receipt.datetime < from {
                        return false;
                    }
                }
                if let Some(to) = date_to {
                    if receipt.datetime > to {
                        return false;
                    }
                }
                if let Some(method) = payment_method {
                    if receipt.payment_method.as_str() != method {
                        return false;
                    }
                }
                if let Some(status) = status {
                    if receipt.status.as_str() != status {
                        return false;
                    }
                }
                if let Some(entity) = entity {
                    if receipt.entity != entity {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        drop(inner);

        // Most recent first. The sort is stable, so ties keep insertion order.
        matches.sort_by(|a, b| b.datetime.cmp(&a.datetime));

        timer.observe_duration();
        Ok(matches)
    }

    async fn get_receipt(&self, id: Uuid) -> Result<Option<Receipt>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.receipts.iter().find(|r| r.id == id).cloned())
    }

    async fn create_receipt(&self, input: CreateReceipt) -> Result<Receipt, AppError> {
        let timer = STORE_OP_DURATION
            .with_label_values(&["create_receipt"])
            .start_timer();

        input.validate()?;

        let receipt_number = required_text(input.receipt_number, "receiptNumber")?;
        let entity = required_text(input.entity, "entity")?;
        let staff = required_text(input.staff, "staff")?;
        let branch = required_text(input.branch, "branch")?;
        let salesman_name = required_text(input.salesman_name, "salesmanName")?;

        let payment_method = required_text(input.payment_method, "paymentMethod")?
            .parse::<PaymentMethod>()
            .map_err(AppError::BadRequest)?;
        let status = match input.status.as_deref() {
            None | Some("") => ReceiptStatus::Completed,
            Some(value) => value.parse::<ReceiptStatus>().map_err(AppError::BadRequest)?,
        };

        let total_amount = input
            .total_amount
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("totalAmount is required")))?;
        let total_amount = amount(Some(total_amount), "totalAmount")?;
        let credit_amount = amount(input.credit_amount, "creditAmount")?;
        let recovery_amount = amount(input.recovery_amount, "recoveryAmount")?;
        let outstanding_amount = amount(input.outstanding_amount, "outstandingAmount")?;

        let receipt = Receipt {
            id: Uuid::new_v4(),
            receipt_number,
            datetime: input.datetime.unwrap_or_else(Utc::now),
            entity,
            vehicle: input.vehicle,
            staff,
            branch,
            payment_method,
            credit_amount,
            recovery_amount,
            total_amount,
            outstanding_amount,
            status,
            salesman_name,
            salesman_photo: input.salesman_photo,
            salesman_message: input.salesman_message,
            receipt_photos: input.receipt_photos.unwrap_or_default(),
        };

        let mut inner = self.inner.write().await;
        if inner
            .receipts
            .iter()
            .any(|r| r.receipt_number == receipt.receipt_number)
        {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Receipt number '{}' already exists",
                receipt.receipt_number
            )));
        }
        inner.receipts.push(receipt.clone());
        drop(inner);

        RECEIPTS_TOTAL
            .with_label_values(&[receipt.payment_method.as_str()])
            .inc();
        timer.observe_duration();

        tracing::info!(
            receipt_id = %receipt.id,
            receipt_number = %receipt.receipt_number,
            "Receipt created"
        );
        Ok(receipt)
    }

    async fn update_receipt_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Receipt>, AppError> {
        // Validate before taking the write guard; a bad status must not
        // touch the record.
        let status = status
            .parse::<ReceiptStatus>()
            .map_err(AppError::BadRequest)?;

        let mut inner = self.inner.write().await;
        let Some(receipt) = inner.receipts.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        receipt.status = status;

        tracing::info!(receipt_id = %id, status = %status, "Receipt status updated");
        Ok(Some(receipt.clone()))
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.schedules.clone())
    }

    async fn create_schedule(&self, input: CreateSchedule) -> Result<Schedule, AppError> {
        let timer = STORE_OP_DURATION
            .with_label_values(&["create_schedule"])
            .start_timer();

        input.validate()?;

        let frequency = required_text(input.frequency, "frequency")?
            .parse::<ScheduleFrequency>()
            .map_err(AppError::BadRequest)?;
        let time = time_of_day(required_text(input.time, "time")?)?;
        let format = required_text(input.format, "format")?
            .parse::<ExportFormat>()
            .map_err(AppError::BadRequest)?;

        let schedule = Schedule {
            id: Uuid::new_v4(),
            frequency,
            time,
            format,
            email: input.email,
            auto_download: input.auto_download.unwrap_or(false),
            is_active: input.is_active.unwrap_or(true),
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.schedules.push(schedule.clone());
        drop(inner);

        SCHEDULES_TOTAL
            .with_label_values(&[schedule.frequency.as_str()])
            .inc();
        timer.observe_duration();

        tracing::info!(schedule_id = %schedule.id, frequency = %schedule.frequency, "Schedule created");
        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        id: Uuid,
        input: UpdateSchedule,
    ) -> Result<Option<Schedule>, AppError> {
        input.validate()?;

        // Parse everything up front so a half-bad payload changes nothing.
        let frequency = input
            .frequency
            .map(|v| v.parse::<ScheduleFrequency>().map_err(AppError::BadRequest))
            .transpose()?;
        let format = input
            .format
            .map(|v| {
                v.parse::<ExportFormat>()
                    .map_err(AppError::BadRequest)
            })
            .transpose()?;
        let time = input.time.map(time_of_day).transpose()?;

        let mut inner = self.inner.write().await;
        let Some(schedule) = inner.schedules.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        if let Some(frequency) = frequency {
            schedule.frequency = frequency;
        }
        if let Some(time) = time {
            schedule.time = time;
        }
        if let Some(format) = format {
            schedule.format = format;
        }
        if let Some(email) = input.email {
            schedule.email = Some(email);
        }
        if let Some(auto_download) = input.auto_download {
            schedule.auto_download = auto_download;
        }
        if let Some(is_active) = input.is_active {
            schedule.is_active = is_active;
        }

        tracing::info!(schedule_id = %id, "Schedule updated");
        Ok(Some(schedule.clone()))
    }

    async fn delete_schedule(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.schedules.len();
        inner.schedules.retain(|s| s.id != id);
        let deleted = inner.schedules.len() != before;
        if deleted {
            tracing::info!(schedule_id = %id, "Schedule deleted");
        }
        Ok(deleted)
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(anyhow::anyhow!(
            "{} is required",
            field
        ))),
    }
}

fn amount(value: Option<Decimal>, field: &'static str) -> Result<Decimal, AppError> {
    let value = value.unwrap_or(Decimal::ZERO);
    if value < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(value.round_dp(2))
}

fn time_of_day(value: String) -> Result<String, AppError> {
    NaiveTime::parse_from_str(&value, "%H:%M").map_err(|_| {
        AppError::BadRequest(anyhow::anyhow!("time must be HH:MM, got '{}'", value))
    })?;
    Ok(value)
}

/// Parse a `dateFrom`/`dateTo` query value into an inclusive UTC bound.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`, or a bare date, which
/// means midnight UTC for both bounds.
fn parse_date_bound(field: &'static str, value: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(AppError::BadRequest(anyhow::anyhow!(
        "Invalid {} date: '{}'",
        field,
        value
    )))
}

/// Sample receipts used to seed a fresh store.
fn demo_receipts() -> Vec<CreateReceipt> {
    let receipt = |number: &str,
                   datetime: &str,
                   entity: &str,
                   vehicle: &str,
                   staff: &str,
                   branch: &str,
                   method: &str,
                   credit: i64,
                   recovery: i64,
                   total: i64,
                   outstanding: i64,
                   status: &str,
                   salesman: &str| CreateReceipt {
        receipt_number: Some(number.to_string()),
        datetime: datetime.parse().ok(),
        entity: Some(entity.to_string()),
        vehicle: Some(vehicle.to_string()),
        staff: Some(staff.to_string()),
        branch: Some(branch.to_string()),
        payment_method: Some(method.to_string()),
        credit_amount: Some(Decimal::from(credit)),
        recovery_amount: Some(Decimal::from(recovery)),
        total_amount: Some(Decimal::from(total)),
        outstanding_amount: Some(Decimal::from(outstanding)),
        status: Some(status.to_string()),
        salesman_name: Some(salesman.to_string()),
        ..Default::default()
    };

    vec![
        receipt(
            "56789",
            "2025-08-20T10:30:00Z",
            "Ali Transport",
            "ABC-123",
            "Hamza Khan",
            "Main Branch",
            "cash",
            5000,
            2000,
            12000,
            8000,
            "completed",
            "Bilal Ahmed",
        ),
        receipt(
            "56790",
            "2025-08-21T14:15:00Z",
            "Khan Industries",
            "XYZ-456",
            "Ahmed Ali",
            "North Branch",
            "credit",
            15000,
            0,
            15000,
            15000,
            "pending",
            "Imran Qureshi",
        ),
        receipt(
            "56791",
            "2025-08-22T09:45:00Z",
            "City Logistics",
            "PQR-789",
            "Sara Sheikh",
            "South Branch",
            "recovery",
            0,
            8500,
            8500,
            0,
            "completed",
            "Bilal Ahmed",
        ),
        receipt(
            "56792",
            "2025-08-18T16:20:00Z",
            "Express Delivery",
            "RST-101",
            "Usman Malik",
            "East Branch",
            "credit",
            25000,
            5000,
            30000,
            20000,
            "overdue",
            "Imran Qureshi",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_receipt(number: &str, entity: &str) -> CreateReceipt {
        CreateReceipt {
            receipt_number: Some(number.to_string()),
            entity: Some(entity.to_string()),
            staff: Some("Hamza Khan".to_string()),
            branch: Some("Main Branch".to_string()),
            payment_method: Some("cash".to_string()),
            total_amount: Some(Decimal::from(1000)),
            salesman_name: Some("Bilal Ahmed".to_string()),
            ..Default::default()
        }
    }

    fn sample_schedule() -> CreateSchedule {
        CreateSchedule {
            frequency: Some("daily".to_string()),
            time: Some("09:00".to_string()),
            format: Some("pdf".to_string()),
            ..Default::default()
        }
    }

    fn dt(value: &str) -> DateTime<Utc> {
        value.parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_returns_stored_record() {
        let store = MemoryStore::new();
        let created = store
            .create_receipt(sample_receipt("100", "Ali Transport"))
            .await
            .unwrap();

        let fetched = store.get_receipt(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_fills_defaults() {
        let store = MemoryStore::new();
        let before = Utc::now();
        let created = store
            .create_receipt(sample_receipt("100", "Ali Transport"))
            .await
            .unwrap();

        assert_eq!(created.status, ReceiptStatus::Completed);
        assert_eq!(created.credit_amount, Decimal::ZERO);
        assert_eq!(created.recovery_amount, Decimal::ZERO);
        assert_eq!(created.outstanding_amount, Decimal::ZERO);
        assert!(created.receipt_photos.is_empty());
        assert!(created.vehicle.is_none());
        assert!(created.datetime >= before && created.datetime <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_enums() {
        let store = MemoryStore::new();

        let mut input = sample_receipt("100", "Ali Transport");
        input.payment_method = Some("barter".to_string());
        assert!(matches!(
            store.create_receipt(input).await,
            Err(AppError::BadRequest(_))
        ));

        let mut input = sample_receipt("100", "Ali Transport");
        input.status = Some("archived".to_string());
        assert!(matches!(
            store.create_receipt(input).await,
            Err(AppError::BadRequest(_))
        ));

        // Nothing was stored by the failed attempts.
        assert!(store
            .list_receipts(&ReceiptFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_required_field() {
        let store = MemoryStore::new();
        let mut input = sample_receipt("100", "Ali Transport");
        input.entity = None;
        assert!(matches!(
            store.create_receipt(input).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_amount() {
        let store = MemoryStore::new();
        let mut input = sample_receipt("100", "Ali Transport");
        input.credit_amount = Some(Decimal::from(-5));
        assert!(matches!(
            store.create_receipt(input).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_receipt_number() {
        let store = MemoryStore::new();
        store
            .create_receipt(sample_receipt("100", "Ali Transport"))
            .await
            .unwrap();

        let result = store
            .create_receipt(sample_receipt("100", "Khan Industries"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(
            store
                .list_receipts(&ReceiptFilter::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_date_from_is_inclusive_and_sorted_descending() {
        let store = MemoryStore::new();
        for (number, datetime) in [
            ("1", "2025-08-20T10:00:00Z"),
            ("2", "2025-08-21T10:00:00Z"),
            ("3", "2025-08-22T10:00:00Z"),
        ] {
            let mut input = sample_receipt(number, "Ali Transport");
            input.datetime = Some(dt(datetime));
            store.create_receipt(input).await.unwrap();
        }

        let filter = ReceiptFilter {
            date_from: Some("2025-08-21T10:00:00Z".to_string()),
            ..Default::default()
        };
        let matches = store.list_receipts(&filter).await.unwrap();
        let numbers: Vec<&str> = matches.iter().map(|r| r.receipt_number.as_str()).collect();
        assert_eq!(numbers, ["3", "2"]);
    }

    #[tokio::test]
    async fn test_date_to_accepts_bare_dates() {
        let store = MemoryStore::new();
        for (number, datetime) in [
            ("1", "2025-08-20T10:00:00Z"),
            ("2", "2025-08-22T09:45:00Z"),
        ] {
            let mut input = sample_receipt(number, "Ali Transport");
            input.datetime = Some(dt(datetime));
            store.create_receipt(input).await.unwrap();
        }

        // A bare date is midnight UTC, so receipts later that day fall
        // outside the bound.
        let filter = ReceiptFilter {
            date_to: Some("2025-08-22".to_string()),
            ..Default::default()
        };
        let matches = store.list_receipts(&filter).await.unwrap();
        let numbers: Vec<&str> = matches.iter().map(|r| r.receipt_number.as_str()).collect();
        assert_eq!(numbers, ["1"]);
    }

    #[tokio::test]
    async fn test_invalid_date_bound_is_rejected() {
        let store = MemoryStore::new();
        let filter = ReceiptFilter {
            date_from: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.list_receipts(&filter).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let store = MemoryStore::new();
        let mut ali = sample_receipt("56789", "Ali Transport");
        ali.vehicle = Some("ABC-123".to_string());
        store.create_receipt(ali).await.unwrap();
        store
            .create_receipt(sample_receipt("56790", "Khan Industries"))
            .await
            .unwrap();

        for term in ["ali", "ALI", "abc-123", "56789"] {
            let filter = ReceiptFilter {
                search: Some(term.to_string()),
                ..Default::default()
            };
            let matches = store.list_receipts(&filter).await.unwrap();
            assert_eq!(matches.len(), 1, "term {term:?}");
            assert_eq!(matches[0].receipt_number, "56789");
        }

        // "Khan" also appears in the first receipt's staff name.
        let filter = ReceiptFilter {
            search: Some("khan".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list_receipts(&filter).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sentinel_all_is_equivalent_to_omitting() {
        let store = MemoryStore::new();
        store.seed_demo_data().await.unwrap();

        let everything = store
            .list_receipts(&ReceiptFilter::default())
            .await
            .unwrap();
        let with_sentinels = store
            .list_receipts(&ReceiptFilter {
                payment_method: Some("all".to_string()),
                status: Some("all".to_string()),
                entity: Some("all".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(everything, with_sentinels);
        assert_eq!(everything.len(), 4);
    }

    #[tokio::test]
    async fn test_exact_match_filters_combine_with_and() {
        let store = MemoryStore::new();
        store.seed_demo_data().await.unwrap();

        let filter = ReceiptFilter {
            payment_method: Some("credit".to_string()),
            status: Some("overdue".to_string()),
            ..Default::default()
        };
        let matches = store.list_receipts(&filter).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].receipt_number, "56792");

        // An out-of-enum filter value matches nothing rather than erroring.
        let filter = ReceiptFilter {
            payment_method: Some("barter".to_string()),
            ..Default::default()
        };
        assert!(store.list_receipts(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_replaces_only_status() {
        let store = MemoryStore::new();
        let created = store
            .create_receipt(sample_receipt("100", "Ali Transport"))
            .await
            .unwrap();

        let updated = store
            .update_receipt_status(created.id, "overdue")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ReceiptStatus::Overdue);
        assert_eq!(
            Receipt {
                status: created.status,
                ..updated
            },
            created
        );
    }

    #[tokio::test]
    async fn test_invalid_status_update_leaves_record_untouched() {
        let store = MemoryStore::new();
        let created = store
            .create_receipt(sample_receipt("100", "Ali Transport"))
            .await
            .unwrap();

        let result = store.update_receipt_status(created.id, "foo").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let fetched = store.get_receipt(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ReceiptStatus::Completed);
    }

    #[tokio::test]
    async fn test_update_status_of_missing_receipt_returns_none() {
        let store = MemoryStore::new();
        let result = store
            .update_receipt_status(Uuid::new_v4(), "pending")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_schedule_applies_defaults() {
        let store = MemoryStore::new();
        let schedule = store.create_schedule(sample_schedule()).await.unwrap();

        assert_eq!(schedule.frequency, ScheduleFrequency::Daily);
        assert_eq!(schedule.time, "09:00");
        assert!(!schedule.auto_download);
        assert!(schedule.is_active);
        assert!(schedule.email.is_none());
    }

    #[tokio::test]
    async fn test_create_schedule_rejects_bad_input() {
        let store = MemoryStore::new();

        let mut input = sample_schedule();
        input.frequency = Some("yearly".to_string());
        assert!(store.create_schedule(input).await.is_err());

        let mut input = sample_schedule();
        input.time = Some("9 o'clock".to_string());
        assert!(store.create_schedule(input).await.is_err());

        let mut input = sample_schedule();
        input.email = Some("not-an-email".to_string());
        assert!(matches!(
            store.create_schedule(input).await,
            Err(AppError::ValidationError(_))
        ));

        assert!(store.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_schedule_merges_only_supplied_fields() {
        let store = MemoryStore::new();
        let created = store.create_schedule(sample_schedule()).await.unwrap();

        let update = UpdateSchedule {
            email: Some("ops@example.com".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_schedule(created.id, update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.email.as_deref(), Some("ops@example.com"));
        assert_eq!(updated.frequency, created.frequency);
        assert_eq!(updated.time, created.time);
        assert_eq!(updated.format, created.format);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_schedule_rejects_bad_field_without_merging() {
        let store = MemoryStore::new();
        let created = store.create_schedule(sample_schedule()).await.unwrap();

        let update = UpdateSchedule {
            email: Some("ops@example.com".to_string()),
            format: Some("csv".to_string()),
            ..Default::default()
        };
        assert!(store.update_schedule(created.id, update).await.is_err());

        let fetched = &store.list_schedules().await.unwrap()[0];
        assert!(fetched.email.is_none());
    }

    #[tokio::test]
    async fn test_delete_schedule_missing_id_returns_false() {
        let store = MemoryStore::new();
        store.create_schedule(sample_schedule()).await.unwrap();

        assert!(!store.delete_schedule(Uuid::new_v4()).await.unwrap());
        assert_eq!(store.list_schedules().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_schedule_removes_record() {
        let store = MemoryStore::new();
        let created = store.create_schedule(sample_schedule()).await.unwrap();

        assert!(store.delete_schedule(created.id).await.unwrap());
        assert!(store.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_amounts_round_to_two_decimal_places() {
        let store = MemoryStore::new();
        let mut input = sample_receipt("100", "Ali Transport");
        input.total_amount = Some("1000.1234".parse().unwrap());
        let created = store.create_receipt(input).await.unwrap();
        assert_eq!(created.total_amount, "1000.12".parse::<Decimal>().unwrap());
    }
}
