//! Owning in-memory collections for records and bills.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Bill, Record};
use crate::errors::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordBook {
    records: Vec<Record>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, replacing any record with the same id in place.
    /// Returns `true` when an existing record was replaced.
    pub fn upsert(&mut self, record: Record) -> bool {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => {
                self.records.push(record);
                false
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Record> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillBook {
    bills: Vec<Bill>,
}

impl BillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bill: Bill) -> CoreResult<&Bill> {
        if self.get(&bill.id).is_some() {
            return Err(CoreError::Validation(format!(
                "bill `{}` already exists",
                bill.id
            )));
        }
        self.bills.push(bill);
        Ok(&self.bills[self.bills.len() - 1])
    }

    /// Flips the bill to paid. The caller is expected to cancel its reminders
    /// afterwards (see `ReminderScheduler::cancel_bill`).
    pub fn mark_paid(&mut self, id: &str, at: DateTime<Utc>) -> CoreResult<&Bill> {
        let bill = self
            .bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("bill `{id}`")))?;
        bill.mark_paid(at);
        Ok(bill)
    }

    pub fn remove(&mut self, id: &str) -> CoreResult<Bill> {
        let idx = self
            .bills
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("bill `{id}`")))?;
        Ok(self.bills.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Unpaid bills first, each group ordered by due timestamp.
    pub fn sorted(&self) -> Vec<&Bill> {
        let mut sorted: Vec<&Bill> = self.bills.iter().collect();
        sorted.sort_by_key(|b| (b.is_paid, b.due_at));
        sorted
    }

    pub fn upcoming(&self) -> Vec<&Bill> {
        self.sorted().into_iter().filter(|b| !b.is_paid).collect()
    }

    pub fn paid(&self) -> Vec<&Bill> {
        self.sorted().into_iter().filter(|b| b.is_paid).collect()
    }
}
