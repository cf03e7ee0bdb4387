use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::messages::{due_message, reminder_message};
use super::notifier::{NotificationPayload, TriggerNotifier, TriggerRequest};
use crate::errors::{CoreError, CoreResult, NotifierError};
use crate::ledger::Bill;

pub const DEFAULT_CHANNEL: &str = "bills-reminders";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
pub const DEFAULT_NOTIFIER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    /// Advance notice ahead of the due date.
    Reminder,
    Due,
}

impl ReminderKind {
    fn suffix(self) -> &'static str {
        match self {
            ReminderKind::Reminder => "reminder",
            ReminderKind::Due => "due",
        }
    }

    pub fn reminder_id(self, bill_id: &str) -> String {
        format!("{bill_id}_{}", self.suffix())
    }
}

/// A trigger derived from a bill at planning time. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledReminder {
    pub reminder_id: String,
    pub bill_id: String,
    pub kind: ReminderKind,
    pub fire_at: DateTime<Utc>,
    pub payload: NotificationPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub channel: String,
    pub currency_symbol: String,
    pub notifier_timeout: Duration,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.into(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            notifier_timeout: DEFAULT_NOTIFIER_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ScheduleOutcome {
    Scheduled {
        reminder: ScheduledReminder,
        notification_id: String,
    },
    Failed {
        reminder: ScheduledReminder,
        error: CoreError,
    },
}

impl ScheduleOutcome {
    pub fn reminder(&self) -> &ScheduledReminder {
        match self {
            ScheduleOutcome::Scheduled { reminder, .. } | ScheduleOutcome::Failed { reminder, .. } => {
                reminder
            }
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled { .. })
    }
}

/// Result of one cancel-all-then-schedule pass.
#[derive(Debug, Default)]
pub struct RescheduleReport {
    pub outcomes: Vec<ScheduleOutcome>,
}

impl RescheduleReport {
    pub fn scheduled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_scheduled()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScheduleOutcome> {
        self.outcomes.iter().filter(|o| !o.is_scheduled())
    }
}

/// Re-derives every bill trigger from the current bill set.
///
/// Each pass starts by cancelling the whole channel, so calling it repeatedly
/// (for example on every start-up) never leaves duplicate triggers behind.
#[derive(Debug, Clone, Default)]
pub struct ReminderScheduler {
    settings: SchedulerSettings,
}

impl ReminderScheduler {
    pub fn new(settings: SchedulerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Computes the triggers that should be pending at `now`. Paid bills and
    /// fire times at or before `now` produce nothing.
    pub fn plan(&self, bills: &[Bill], now: DateTime<Utc>) -> Vec<ScheduledReminder> {
        let symbol = self.settings.currency_symbol.as_str();
        let mut planned = Vec::new();
        for bill in bills.iter().filter(|b| !b.is_paid) {
            match bill.reminder_at() {
                Some(reminder_at) if reminder_at > now => planned.push(ScheduledReminder {
                    reminder_id: ReminderKind::Reminder.reminder_id(&bill.id),
                    bill_id: bill.id.clone(),
                    kind: ReminderKind::Reminder,
                    fire_at: reminder_at,
                    payload: reminder_message(bill, symbol),
                }),
                Some(_) => {}
                None => warn!(
                    bill_id = %bill.id,
                    days_before = bill.reminder_days_before,
                    "reminder lead time out of range; skipping advance reminder"
                ),
            }
            if bill.due_at > now {
                planned.push(ScheduledReminder {
                    reminder_id: ReminderKind::Due.reminder_id(&bill.id),
                    bill_id: bill.id.clone(),
                    kind: ReminderKind::Due,
                    fire_at: bill.due_at,
                    payload: due_message(bill, symbol),
                });
            }
        }
        planned
    }

    /// Cancels the channel, then schedules every planned trigger.
    ///
    /// A failed cancel aborts the pass with `NotifierUnavailable`. A failed
    /// schedule is recorded in the report and the pass moves on.
    pub async fn reschedule<N>(
        &self,
        bills: &[Bill],
        now: DateTime<Utc>,
        notifier: &N,
    ) -> CoreResult<RescheduleReport>
    where
        N: TriggerNotifier + ?Sized,
    {
        let channel = self.settings.channel.as_str();
        self.bounded(notifier.cancel_all(channel))
            .await
            .map_err(|err| {
                warn!(channel, error = %err, "cancel-all failed; reschedule aborted");
                CoreError::NotifierUnavailable(err)
            })?;

        let mut report = RescheduleReport::default();
        for reminder in self.plan(bills, now) {
            let request = TriggerRequest {
                id: reminder.reminder_id.clone(),
                channel: channel.to_string(),
                fire_at: reminder.fire_at,
                payload: reminder.payload.clone(),
            };
            match self.bounded(notifier.schedule(request)).await {
                Ok(notification_id) => {
                    debug!(
                        reminder_id = %reminder.reminder_id,
                        fire_at = %reminder.fire_at,
                        "scheduled bill reminder"
                    );
                    report.outcomes.push(ScheduleOutcome::Scheduled {
                        reminder,
                        notification_id,
                    });
                }
                Err(source) => {
                    warn!(
                        reminder_id = %reminder.reminder_id,
                        error = %source,
                        "failed to schedule bill reminder"
                    );
                    let error = CoreError::ScheduleFailed {
                        reminder_id: reminder.reminder_id.clone(),
                        source,
                    };
                    report.outcomes.push(ScheduleOutcome::Failed { reminder, error });
                }
            }
        }

        info!(
            bills = bills.len(),
            scheduled = report.scheduled_count(),
            failed = report.failures().count(),
            "rescheduled bill reminders"
        );
        Ok(report)
    }

    /// Cancels both triggers of a bill, e.g. after it was paid or deleted.
    /// Both cancels are always attempted; the first failure is returned.
    pub async fn cancel_bill<N>(&self, bill_id: &str, notifier: &N) -> CoreResult<()>
    where
        N: TriggerNotifier + ?Sized,
    {
        let mut first_error = None;
        for kind in [ReminderKind::Reminder, ReminderKind::Due] {
            let id = kind.reminder_id(bill_id);
            if let Err(err) = self.bounded(notifier.cancel(&id)).await {
                warn!(reminder_id = %id, error = %err, "failed to cancel bill reminder");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(CoreError::NotifierUnavailable(err)),
            None => {
                debug!(bill_id, "cancelled bill reminders");
                Ok(())
            }
        }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, NotifierError>
    where
        F: Future<Output = Result<T, NotifierError>>,
    {
        let limit = self.settings.notifier_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(NotifierError::TimedOut(limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
    }

    fn bill(due_in: ChronoDuration, days_before: u32) -> Bill {
        Bill::new("Rent", 900.0, now() + due_in, days_before, now()).unwrap()
    }

    #[test]
    fn plans_reminder_and_due_for_future_bill() {
        let bill = bill(ChronoDuration::days(2), 1);
        let planned = ReminderScheduler::default().plan(std::slice::from_ref(&bill), now());
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].kind, ReminderKind::Reminder);
        assert_eq!(planned[0].reminder_id, format!("{}_reminder", bill.id));
        assert_eq!(planned[0].fire_at, now() + ChronoDuration::days(1));
        assert_eq!(planned[1].kind, ReminderKind::Due);
        assert_eq!(planned[1].reminder_id, format!("{}_due", bill.id));
        assert_eq!(planned[1].fire_at, now() + ChronoDuration::days(2));
    }

    #[test]
    fn skips_paid_and_elapsed_triggers() {
        let mut paid = bill(ChronoDuration::days(5), 1);
        paid.mark_paid(now());
        let overdue = bill(ChronoDuration::days(-1), 1);
        // Reminder window already passed, due date still ahead.
        let close = bill(ChronoDuration::hours(6), 1);

        let planned = ReminderScheduler::default().plan(&[paid, overdue, close.clone()], now());
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].bill_id, close.id);
        assert_eq!(planned[0].kind, ReminderKind::Due);
    }

    #[test]
    fn fire_time_equal_to_now_is_skipped() {
        let bill = bill(ChronoDuration::zero(), 0);
        assert!(ReminderScheduler::default().plan(&[bill], now()).is_empty());
    }

    #[test]
    fn zero_day_lead_time_emits_reminder_and_due_together() {
        let bill = bill(ChronoDuration::days(1), 0);
        let planned = ReminderScheduler::default().plan(std::slice::from_ref(&bill), now());
        let kinds: Vec<ReminderKind> = planned.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ReminderKind::Reminder, ReminderKind::Due]);
        assert!(planned.iter().all(|r| r.fire_at == bill.due_at));
        assert_ne!(planned[0].reminder_id, planned[1].reminder_id);
    }

    #[test]
    fn out_of_range_lead_time_keeps_due_trigger_and_other_bills() {
        let broken = bill(ChronoDuration::days(2), u32::MAX);
        let healthy = bill(ChronoDuration::days(3), 1);
        let planned = ReminderScheduler::default().plan(&[broken.clone(), healthy.clone()], now());
        let ids: Vec<String> = planned.into_iter().map(|r| r.reminder_id).collect();
        assert_eq!(
            ids,
            vec![
                format!("{}_due", broken.id),
                format!("{}_reminder", healthy.id),
                format!("{}_due", healthy.id),
            ]
        );
    }

    #[test]
    fn payloads_use_configured_currency() {
        let scheduler = ReminderScheduler::new(SchedulerSettings {
            currency_symbol: "$".into(),
            ..SchedulerSettings::default()
        });
        let planned = scheduler.plan(&[bill(ChronoDuration::days(3), 1)], now());
        assert!(planned.iter().all(|r| r.payload.body.contains("$900.00")));
    }
}
