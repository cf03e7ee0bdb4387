//! Expense and sales report figures: range filtering, category and product
//! breakdowns, and the remaining budget for a known income.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::errors::CoreError;
use crate::ledger::{Period, Record, RecordKind};

pub const UNCATEGORIZED: &str = "Others";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportRange {
    Monthly,
    Yearly,
    All,
}

impl ReportRange {
    pub fn includes(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            ReportRange::Monthly => date.year() == today.year() && date.month() == today.month(),
            ReportRange::Yearly => date.year() == today.year(),
            ReportRange::All => true,
        }
    }
}

impl FromStr for ReportRange {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(ReportRange::Monthly),
            "yearly" | "year" => Ok(ReportRange::Yearly),
            "all" => Ok(ReportRange::All),
            other => Err(CoreError::InvalidArgument(format!(
                "unknown report range `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Units and takings for one product within a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub product: String,
    pub quantity: u64,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub basic: f64,
    pub other: f64,
    pub count: usize,
    pub remaining_budget: Option<f64>,
}

fn expenses_in_range(
    records: &[Record],
    range: ReportRange,
    today: NaiveDate,
) -> impl Iterator<Item = &Record> {
    records
        .iter()
        .filter(move |r| r.kind == RecordKind::Expense && range.includes(r.date, today))
}

/// Sums expenses per category, largest first.
pub fn category_breakdown(
    records: &[Record],
    range: ReportRange,
    today: NaiveDate,
) -> Vec<CategoryTotal> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for record in expenses_in_range(records, range, today) {
        let category = record.category.as_deref().unwrap_or(UNCATEGORIZED);
        *sums.entry(category).or_insert(0.0) += record.amount;
    }

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

pub fn summarize_expenses(
    records: &[Record],
    range: ReportRange,
    today: NaiveDate,
    basic_category: &str,
    monthly_income: Option<f64>,
) -> ExpenseSummary {
    let mut summary = ExpenseSummary::default();
    for record in expenses_in_range(records, range, today) {
        summary.total += record.amount;
        summary.count += 1;
        if record.category.as_deref() == Some(basic_category) {
            summary.basic += record.amount;
        }
    }
    summary.other = summary.total - summary.basic;
    summary.remaining_budget = monthly_income.map(|income| income - summary.total);
    summary
}

/// Total sales recorded on `today`.
pub fn sales_total_for_day(records: &[Record], today: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|r| r.kind == RecordKind::Sale && r.date == today)
        .map(|r| r.amount)
        .sum()
}

/// Sums sales per product over the period bucket containing `today`, in the
/// order each product first appears. Sales without a product fall back to
/// their category, then to [`UNCATEGORIZED`]; a missing quantity counts as one.
pub fn sales_by_product(
    records: &[Record],
    period: Period,
    today: NaiveDate,
) -> Vec<ProductTotal> {
    let window = period.bucket_for(today);
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ProductTotal> = Vec::new();

    for record in records
        .iter()
        .filter(|r| r.kind == RecordKind::Sale && window.contains(r.date))
    {
        let product = record
            .product
            .as_deref()
            .or(record.category.as_deref())
            .unwrap_or(UNCATEGORIZED);
        let slot = *index.entry(product).or_insert_with(|| {
            totals.push(ProductTotal {
                product: product.to_string(),
                quantity: 0,
                amount: 0.0,
            });
            totals.len() - 1
        });
        let total = &mut totals[slot];
        total.quantity += u64::from(record.quantity.unwrap_or(1));
        total.amount += record.amount;
    }
    totals
}
