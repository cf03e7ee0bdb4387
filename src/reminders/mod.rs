//! Bill reminder derivation and the notifier boundary it drives.

pub mod alerts;
pub mod messages;
pub mod notifier;
pub mod scheduler;

pub use alerts::{due_alerts, AlertKind, BillAlert};
pub use messages::{due_message, overdue_message, reminder_message};
pub use notifier::{InMemoryNotifier, NotificationPayload, TriggerNotifier, TriggerRequest};
pub use scheduler::{
    ReminderKind, ReminderScheduler, RescheduleReport, ScheduleOutcome, ScheduledReminder,
    SchedulerSettings,
};
