use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::chart::ChartFigure;

/// Document count of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CollectionCount {
    pub name: String,
    pub count: u64,
}

/// Number of documents created on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueueRow {
    pub name: String,
    pub messages: u64,
}

/// Broker queue table, or the message shown in its place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueueTable {
    Available {
        columns: Vec<String>,
        rows: Vec<QueueRow>,
    },
    Unavailable {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TotalsEntry {
    pub key: String,
    /// Display value, numbers carry thousands separators
    pub value: String,
}

/// Key/value view of the broker overview `queue_totals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TotalsSummary {
    Available { entries: Vec<TotalsEntry> },
    Unavailable { message: String },
}

/// A freshly rendered panel, as pushed on the live feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Panel {
    Collections(ChartFigure),
    DailyTransactions(ChartFigure),
    Queues(QueueTable),
    QueueHistory(ChartFigure),
    QueueTotals(TotalsSummary),
}

impl Panel {
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Collections(_) => "collections",
            Panel::DailyTransactions(_) => "daily_transactions",
            Panel::Queues(_) => "queues",
            Panel::QueueHistory(_) => "queue_history",
            Panel::QueueTotals(_) => "queue_totals",
        }
    }
}

/// Latest rendering of every panel.
///
/// Panels that refresh on a timer are `None` until their first tick
/// completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSnapshot {
    pub collections: Option<ChartFigure>,
    pub daily_transactions: ChartFigure,
    pub queues: Option<QueueTable>,
    pub queue_history: ChartFigure,
    pub queue_totals: Option<TotalsSummary>,
    pub updated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn new(daily_transactions: ChartFigure, queue_history: ChartFigure) -> Self {
        Self {
            collections: None,
            daily_transactions,
            queues: None,
            queue_history,
            queue_totals: None,
            updated_at: Utc::now(),
        }
    }

    /// Replace the stored rendering of `panel`'s component
    pub fn apply(&mut self, panel: Panel) {
        match panel {
            Panel::Collections(chart) => self.collections = Some(chart),
            Panel::DailyTransactions(chart) => self.daily_transactions = chart,
            Panel::Queues(table) => self.queues = Some(table),
            Panel::QueueHistory(chart) => self.queue_history = chart,
            Panel::QueueTotals(totals) => self.queue_totals = Some(totals),
        }
        self.updated_at = Utc::now();
    }

    /// Every panel produced so far, in display order
    pub fn panels(&self) -> Vec<Panel> {
        let mut panels = Vec::with_capacity(5);
        if let Some(chart) = &self.collections {
            panels.push(Panel::Collections(chart.clone()));
        }
        panels.push(Panel::DailyTransactions(self.daily_transactions.clone()));
        if let Some(table) = &self.queues {
            panels.push(Panel::Queues(table.clone()));
        }
        panels.push(Panel::QueueHistory(self.queue_history.clone()));
        if let Some(totals) = &self.queue_totals {
            panels.push(Panel::QueueTotals(totals.clone()));
        }
        panels
    }
}
