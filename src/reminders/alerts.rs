use chrono::NaiveDate;
use serde::Serialize;

use super::messages::{due_message, overdue_message};
use super::notifier::NotificationPayload;
use crate::ledger::{Bill, BillStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    DueToday,
    Overdue { days: u64 },
}

/// Notification to show right away rather than through a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillAlert {
    pub bill_id: String,
    pub kind: AlertKind,
    pub payload: NotificationPayload,
}

/// Immediate alerts for unpaid bills due on or before `today`, in bill order.
pub fn due_alerts(bills: &[Bill], today: NaiveDate, currency_symbol: &str) -> Vec<BillAlert> {
    bills
        .iter()
        .filter_map(|bill| {
            let (kind, payload) = match bill.status(today) {
                BillStatus::DueToday => (AlertKind::DueToday, due_message(bill, currency_symbol)),
                BillStatus::Overdue => {
                    let days = bill.days_until_due(today).unsigned_abs();
                    (
                        AlertKind::Overdue { days },
                        overdue_message(bill, days, currency_symbol),
                    )
                }
                BillStatus::Upcoming | BillStatus::Paid => return None,
            };
            Some(BillAlert {
                bill_id: bill.id.clone(),
                kind,
                payload,
            })
        })
        .collect()
}
