use super::notifier::NotificationPayload;
use crate::ledger::Bill;

fn amount_label(bill: &Bill, currency_symbol: &str) -> String {
    format!("Amount: {currency_symbol}{:.2}", bill.amount)
}

fn plural_days(days: u64) -> &'static str {
    if days == 1 {
        "day"
    } else {
        "days"
    }
}

/// Advance notice sent `reminder_days_before` days ahead of the due date.
pub fn reminder_message(bill: &Bill, currency_symbol: &str) -> NotificationPayload {
    let when = match bill.reminder_days_before {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {n} {}", plural_days(u64::from(n))),
    };
    NotificationPayload {
        title: "Bill Reminder".into(),
        body: format!(
            "{} is due {when}! {}",
            bill.name,
            amount_label(bill, currency_symbol)
        ),
    }
}

pub fn due_message(bill: &Bill, currency_symbol: &str) -> NotificationPayload {
    NotificationPayload {
        title: "Bill Due Today!".into(),
        body: format!(
            "{} is due today! {}",
            bill.name,
            amount_label(bill, currency_symbol)
        ),
    }
}

pub fn overdue_message(bill: &Bill, days_overdue: u64, currency_symbol: &str) -> NotificationPayload {
    NotificationPayload {
        title: "Overdue Bill!".into(),
        body: format!(
            "{} is overdue by {days_overdue} {}! {}",
            bill.name,
            plural_days(days_overdue),
            amount_label(bill, currency_symbol)
        ),
    }
}
