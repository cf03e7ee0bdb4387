//! Domain models for dated records, bills, and reporting periods.

pub mod bill;
pub mod books;
pub mod period;
pub mod record;

pub use bill::{Bill, BillStatus};
pub use books::{BillBook, RecordBook};
pub use period::{BucketKey, Period};
pub use record::{Record, RecordKind};
