use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Sale,
    Investment,
}

impl RecordKind {
    fn id_prefix(self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Sale => "sale",
            RecordKind::Investment => "investment",
        }
    }
}

/// A dated financial entry. Records are replaced wholesale on edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: String,
    pub kind: RecordKind,
    pub date: NaiveDate,
    /// Principal of the entry; the invested amount for investments.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<f64>,
    /// Item sold, for sales rung up per product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Record {
    pub fn new(kind: RecordKind, date: NaiveDate, amount: f64) -> Self {
        Self {
            id: format!("{}_{}", kind.id_prefix(), Uuid::new_v4().simple()),
            kind,
            date,
            amount,
            category: None,
            returns: None,
            product: None,
            quantity: None,
        }
    }

    pub fn expense(date: NaiveDate, amount: f64, category: impl Into<String>) -> Self {
        Self::new(RecordKind::Expense, date, amount).with_category(category)
    }

    pub fn sale(date: NaiveDate, amount: f64) -> Self {
        Self::new(RecordKind::Sale, date, amount)
    }

    /// A sale of `quantity` units of `product` totalling `amount`.
    pub fn sale_of(
        date: NaiveDate,
        product: impl Into<String>,
        quantity: u32,
        amount: f64,
    ) -> Self {
        let mut record = Self::sale(date, amount);
        record.product = Some(product.into());
        record.quantity = Some(quantity);
        record
    }

    pub fn investment(date: NaiveDate, invested: f64, returns: Option<f64>) -> Self {
        let mut record = Self::new(RecordKind::Investment, date, invested);
        record.returns = returns;
        record
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns the `(invested, returns)` contribution of this record.
    pub fn contribution(&self) -> (f64, f64) {
        (self.amount, self.returns.unwrap_or(0.0))
    }
}
