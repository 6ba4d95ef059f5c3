pub mod receipt;
pub mod schedule;

pub use receipt::{CreateReceipt, PaymentMethod, Receipt, ReceiptFilter, ReceiptStatus};
pub use schedule::{CreateSchedule, ExportFormat, Schedule, ScheduleFrequency, UpdateSchedule};
