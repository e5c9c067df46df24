//! Documents created per calendar day, across every collection.
//!
//! Computed once at startup. A document without a creation timestamp fails
//! the whole scan so the dashboard never serves partial counts.

use chrono::{DateTime, NaiveDate, Utc};
use futures::TryStreamExt;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, info};

use crate::constants::charts::{
    DAILY_BAR_COLOR, DAILY_BAR_LINE_COLOR, DAILY_TRANSACTIONS_TITLE, TRANSACTIONS_AXIS,
};
use crate::database::{DocumentStore, StoreResult};
use crate::models::{Axis, ChartFigure, ChartLayout, DailyCount, Marker, MarkerLine, Trace};

/// Per-day document counter keyed by UTC calendar date
#[derive(Debug, Default)]
pub struct DailyBuckets {
    buckets: FxHashMap<NaiveDate, u64>,
}

impl DailyBuckets {
    pub fn record(&mut self, timestamp: DateTime<Utc>) {
        *self.buckets.entry(timestamp.date_naive()).or_insert(0) += 1;
    }

    /// Counts in date order
    pub fn into_counts(self) -> Vec<DailyCount> {
        let mut counts: Vec<DailyCount> = self
            .buckets
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();
        counts.sort_by_key(|c| c.date);
        counts
    }
}

/// Scan every document of every collection and count them per day.
pub async fn build_daily_counts(store: &dyn DocumentStore) -> StoreResult<Vec<DailyCount>> {
    let start = Instant::now();
    let mut buckets = DailyBuckets::default();
    let mut scanned: u64 = 0;

    for collection in store.list_collection_names().await? {
        let mut timestamps = store.creation_timestamps(&collection).await?;
        let mut in_collection: u64 = 0;

        while let Some(timestamp) = timestamps.try_next().await? {
            buckets.record(timestamp);
            in_collection += 1;
        }

        debug!(collection = %collection, documents = in_collection, "Scanned collection");
        scanned += in_collection;
    }

    let counts = buckets.into_counts();
    info!(
        "Daily transaction scan: {} documents over {} days in {:?}",
        scanned,
        counts.len(),
        start.elapsed()
    );
    Ok(counts)
}

pub fn render_daily_chart(counts: &[DailyCount]) -> ChartFigure {
    let x = counts
        .iter()
        .map(|c| c.date.format("%Y-%m-%d").to_string())
        .collect();
    let y = counts.iter().map(|c| c.count as f64).collect();

    let mut trace = Trace::bar(x, y);
    trace.marker = Some(Marker {
        color: DAILY_BAR_COLOR.to_string(),
        line: Some(MarkerLine {
            color: DAILY_BAR_LINE_COLOR.to_string(),
            width: 1.0,
        }),
    });

    let mut layout = ChartLayout::centered(DAILY_TRANSACTIONS_TITLE);
    layout.yaxis = Axis::titled(TRANSACTIONS_AXIS);

    ChartFigure {
        data: vec![trace],
        layout,
    }
}
