//! Rolling history of the broker's total queued messages.
//!
//! A fixed-capacity FIFO of `(timestamp, value)` samples. Each successful
//! overview fetch appends exactly one sample, evicting the oldest once the
//! buffer is full, and the line chart is re-rendered from the whole buffer.
//! A failed fetch leaves the buffer and the last chart untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::VecDeque;

use crate::constants::charts::{
    HISTORY_HEADROOM, QUEUE_HISTORY_AXIS, QUEUE_HISTORY_SERIES, QUEUE_HISTORY_TEMPLATE,
    QUEUE_HISTORY_TITLE,
};
use crate::models::{Axis, ChartFigure, ChartLayout, Trace};

/// One observation of the queued-messages metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// What to record when the overview lacks `queue_totals.messages`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingMetricPolicy {
    /// Record 0, as if the broker had no queued messages
    #[default]
    DefaultZero,
}

impl MissingMetricPolicy {
    pub fn resolve(self, value: Option<f64>) -> f64 {
        match self {
            MissingMetricPolicy::DefaultZero => value.unwrap_or(0.0),
        }
    }
}

/// `queue_totals.messages` of a broker overview, if present and numeric
pub fn extract_queued_messages(overview: &Value) -> Option<f64> {
    overview
        .pointer("/queue_totals/messages")
        .and_then(Value::as_f64)
}

/// Count-bounded FIFO of samples, oldest first
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl HistoryBuffer {
    /// A zero capacity is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `sample`, returning the evicted oldest sample if the buffer was full
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Largest value in the buffer, `None` when empty
    pub fn max_value(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).reduce(f64::max)
    }
}

/// Line chart of the whole buffer.
///
/// The y-axis spans `[0, 1.5 × max]`. An empty buffer renders a placeholder
/// with no series points and no fixed range.
pub fn render_history_chart(buffer: &HistoryBuffer) -> ChartFigure {
    let x = buffer
        .iter()
        .map(|s| s.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
        .collect();
    let y = buffer.iter().map(|s| s.value).collect();

    let mut yaxis = Axis::titled(QUEUE_HISTORY_AXIS);
    if let Some(max) = buffer.max_value() {
        yaxis = yaxis.with_range(0.0, max * HISTORY_HEADROOM);
    }

    let mut layout = ChartLayout::centered(QUEUE_HISTORY_TITLE);
    layout.title.y = Some(0.95);
    layout.yaxis = yaxis;
    layout.template = Some(QUEUE_HISTORY_TEMPLATE.to_string());

    ChartFigure {
        data: vec![Trace::line(QUEUE_HISTORY_SERIES, x, y)],
        layout,
    }
}

/// History buffer plus the policy used to turn overviews into samples
#[derive(Debug, Clone)]
pub struct HistorySampler {
    buffer: HistoryBuffer,
    policy: MissingMetricPolicy,
}

impl HistorySampler {
    pub fn new(capacity: usize, policy: MissingMetricPolicy) -> Self {
        Self {
            buffer: HistoryBuffer::new(capacity),
            policy,
        }
    }

    /// Record one tick.
    ///
    /// `overview` is `None` when the broker was unavailable; the tick is then
    /// skipped and `None` is returned. Otherwise one sample is appended and
    /// the re-rendered chart returned.
    pub fn record(&mut self, now: DateTime<Utc>, overview: Option<&Value>) -> Option<ChartFigure> {
        let overview = overview?;
        let value = self.policy.resolve(extract_queued_messages(overview));

        self.buffer.push(Sample {
            timestamp: now,
            value,
        });
        Some(render_history_chart(&self.buffer))
    }

    pub fn chart(&self) -> ChartFigure {
        render_history_chart(&self.buffer)
    }

    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }
}
