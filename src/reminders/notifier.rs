//! Boundary to the platform service that fires time-triggered notifications.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::NotifierError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    /// Stable id; scheduling the same id again replaces the earlier trigger.
    pub id: String,
    pub channel: String,
    pub fire_at: DateTime<Utc>,
    pub payload: NotificationPayload,
}

/// Minimal contract the reminder scheduler needs from a notification service.
#[async_trait]
pub trait TriggerNotifier: Send + Sync {
    /// Registers a trigger and returns the id the service assigned to it.
    async fn schedule(&self, request: TriggerRequest) -> Result<String, NotifierError>;

    async fn cancel(&self, id: &str) -> Result<(), NotifierError>;

    /// Cancels every pending trigger issued under `channel`.
    async fn cancel_all(&self, channel: &str) -> Result<(), NotifierError>;
}

/// Process-local notifier that keeps pending triggers in memory.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    pending: Mutex<HashMap<String, TriggerRequest>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending triggers for `channel`, ordered by fire time then id.
    pub async fn pending(&self, channel: &str) -> Vec<TriggerRequest> {
        let guard = self.pending.lock().await;
        let mut requests: Vec<TriggerRequest> = guard
            .values()
            .filter(|r| r.channel == channel)
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.id.cmp(&b.id)));
        requests
    }

    /// Removes and returns every trigger due at or before `now`.
    pub async fn fire_due(&self, now: DateTime<Utc>) -> Vec<TriggerRequest> {
        let mut guard = self.pending.lock().await;
        let due: Vec<String> = guard
            .values()
            .filter(|r| r.fire_at <= now)
            .map(|r| r.id.clone())
            .collect();
        let mut fired: Vec<TriggerRequest> =
            due.iter().filter_map(|id| guard.remove(id)).collect();
        fired.sort_by_key(|r| r.fire_at);
        fired
    }
}

#[async_trait]
impl TriggerNotifier for InMemoryNotifier {
    async fn schedule(&self, request: TriggerRequest) -> Result<String, NotifierError> {
        let id = request.id.clone();
        self.pending.lock().await.insert(id.clone(), request);
        Ok(id)
    }

    async fn cancel(&self, id: &str) -> Result<(), NotifierError> {
        self.pending.lock().await.remove(id);
        Ok(())
    }

    async fn cancel_all(&self, channel: &str) -> Result<(), NotifierError> {
        self.pending.lock().await.retain(|_, r| r.channel != channel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn request(id: &str, channel: &str, fire_at: DateTime<Utc>) -> TriggerRequest {
        TriggerRequest {
            id: id.into(),
            channel: channel.into(),
            fire_at,
            payload: NotificationPayload {
                title: "t".into(),
                body: "b".into(),
            },
        }
    }

    #[tokio::test]
    async fn cancel_all_only_clears_its_channel() {
        let notifier = InMemoryNotifier::new();
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        notifier.schedule(request("a", "bills", at)).await.unwrap();
        notifier.schedule(request("b", "orders", at)).await.unwrap();

        notifier.cancel_all("bills").await.unwrap();
        assert!(notifier.pending("bills").await.is_empty());
        assert_eq!(notifier.pending("orders").await.len(), 1);
    }

    #[tokio::test]
    async fn same_id_replaces_previous_trigger() {
        let notifier = InMemoryNotifier::new();
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        notifier.schedule(request("a", "bills", at)).await.unwrap();
        notifier
            .schedule(request("a", "bills", at + Duration::hours(1)))
            .await
            .unwrap();
        let pending = notifier.pending("bills").await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].fire_at, at + Duration::hours(1));
    }

    #[tokio::test]
    async fn fire_due_drains_elapsed_triggers() {
        let notifier = InMemoryNotifier::new();
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        notifier.schedule(request("early", "bills", at)).await.unwrap();
        notifier
            .schedule(request("late", "bills", at + Duration::days(1)))
            .await
            .unwrap();

        let fired = notifier.fire_due(at).await;
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, "early");
        assert_eq!(notifier.pending("bills").await.len(), 1);
    }
}
