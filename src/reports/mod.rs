//! Period aggregation and the derived report figures built on top of records.

pub mod aggregate;
pub mod expenses;
pub mod investment;

pub use aggregate::{aggregate, aggregate_named, Bucket, BucketTotals};
pub use expenses::{
    category_breakdown, sales_by_product, sales_total_for_day, summarize_expenses, CategoryTotal,
    ExpenseSummary, ProductTotal, ReportRange,
};
pub use investment::{project_return, ReturnProjection, DEFAULT_DAILY_RATE};
