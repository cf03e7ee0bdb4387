use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::CoreResult;
use crate::ledger::{BucketKey, Period, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BucketTotals {
    pub invested: f64,
    pub returns: f64,
    pub count: usize,
}

impl BucketTotals {
    fn add(&mut self, record: &Record) {
        let (invested, returns) = record.contribution();
        self.invested += invested;
        self.returns += returns;
        self.count += 1;
    }

    pub fn net(&self) -> f64 {
        self.returns - self.invested
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: BucketKey,
    pub totals: BucketTotals,
}

/// Groups `records` into `period` buckets and reduces each bucket.
///
/// `Period::Day` only keeps records dated `today`; every other period assigns
/// each record to exactly one bucket. Buckets come back ordered by start date,
/// with ties kept in first-seen order.
pub fn aggregate(records: &[Record], period: Period, today: NaiveDate) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<BucketKey, usize> = HashMap::new();

    for record in records {
        if period == Period::Day && record.date != today {
            continue;
        }
        let key = period.bucket_for(record.date);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Bucket {
                key,
                totals: BucketTotals::default(),
            });
            buckets.len() - 1
        });
        buckets[slot].totals.add(record);
    }

    buckets.sort_by_key(|bucket| bucket.key.start_date());
    tracing::debug!(
        period = %period,
        records = records.len(),
        buckets = buckets.len(),
        "aggregated records"
    );
    buckets
}

/// Same as [`aggregate`] with the period given by name, e.g. `"week"`.
pub fn aggregate_named(
    records: &[Record],
    period: &str,
    today: NaiveDate,
) -> CoreResult<Vec<Bucket>> {
    let period: Period = period.parse()?;
    Ok(aggregate(records, period, today))
}
