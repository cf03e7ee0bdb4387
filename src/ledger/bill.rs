use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub due_at: DateTime<Utc>,
    #[serde(default)]
    pub reminder_days_before: u32,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(
        name: &str,
        amount: f64,
        due_at: DateTime<Utc>,
        reminder_days_before: u32,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("bill name must not be empty".into()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "bill amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            id: format!("bill_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            amount,
            due_at,
            reminder_days_before,
            is_paid: false,
            paid_at: None,
            created_at: now,
        })
    }

    pub fn mark_paid(&mut self, at: DateTime<Utc>) {
        self.is_paid = true;
        self.paid_at = Some(at);
    }

    /// Instant of the advance reminder, `None` when the lead time reaches
    /// past the representable range.
    pub fn reminder_at(&self) -> Option<DateTime<Utc>> {
        Duration::try_days(i64::from(self.reminder_days_before))
            .and_then(|lead| self.due_at.checked_sub_signed(lead))
    }

    /// Calendar days from `today` until the due date; negative once overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_at.date_naive() - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> BillStatus {
        if self.is_paid {
            return BillStatus::Paid;
        }
        match self.days_until_due(today) {
            d if d < 0 => BillStatus::Overdue,
            0 => BillStatus::DueToday,
            _ => BillStatus::Upcoming,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillStatus {
    Upcoming,
    DueToday,
    Overdue,
    Paid,
}
