#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use moneywise_core::reminders::{InMemoryNotifier, TriggerNotifier, TriggerRequest};
use moneywise_core::NotifierError;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn instant(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid instant")
}

/// Calls observed by [`ScriptedNotifier`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CancelAll(String),
    Cancel(String),
    Schedule(String),
}

/// Wraps [`InMemoryNotifier`] and injects failures or delays on demand.
#[derive(Default)]
pub struct ScriptedNotifier {
    pub inner: InMemoryNotifier,
    calls: Mutex<Vec<Call>>,
    fail_cancel_all: Mutex<bool>,
    reject_ids: Mutex<HashSet<String>>,
    schedule_delay: Mutex<Option<Duration>>,
    cancel_all_delay: Mutex<Option<Duration>>,
    failing_cancels: Mutex<HashSet<String>>,
}

impl ScriptedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_cancel_all(&self, fail: bool) {
        *self.fail_cancel_all.lock().unwrap() = fail;
    }

    pub fn reject(&self, id: impl Into<String>) {
        self.reject_ids.lock().unwrap().insert(id.into());
    }

    pub fn delay_schedule(&self, delay: Duration) {
        *self.schedule_delay.lock().unwrap() = Some(delay);
    }

    pub fn delay_cancel_all(&self, delay: Duration) {
        *self.cancel_all_delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_cancel(&self, id: impl Into<String>) {
        self.failing_cancels.lock().unwrap().insert(id.into());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TriggerNotifier for ScriptedNotifier {
    async fn schedule(&self, request: TriggerRequest) -> Result<String, NotifierError> {
        self.record(Call::Schedule(request.id.clone()));
        let delay = *self.schedule_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_ids.lock().unwrap().contains(&request.id) {
            return Err(NotifierError::Rejected(format!("bad trigger {}", request.id)));
        }
        self.inner.schedule(request).await
    }

    async fn cancel(&self, id: &str) -> Result<(), NotifierError> {
        self.record(Call::Cancel(id.to_string()));
        if self.failing_cancels.lock().unwrap().contains(id) {
            return Err(NotifierError::Unavailable(format!("cannot cancel {id}")));
        }
        self.inner.cancel(id).await
    }

    async fn cancel_all(&self, channel: &str) -> Result<(), NotifierError> {
        self.record(Call::CancelAll(channel.to_string()));
        let delay = *self.cancel_all_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_cancel_all.lock().unwrap() {
            return Err(NotifierError::Unavailable("notification service offline".into()));
        }
        self.inner.cancel_all(channel).await
    }
}
