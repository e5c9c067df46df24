// Data models and DTOs
// Broker API payloads, chart/table descriptions and dashboard panels.

pub mod broker;
pub mod chart;
pub mod dashboard;

pub use broker::QueueInfo;
pub use chart::{Axis, ChartFigure, ChartLayout, ChartTitle, Marker, MarkerLine, Trace, TraceKind};
pub use dashboard::{
    CollectionCount, DailyCount, DashboardSnapshot, Panel, QueueRow, QueueTable, TotalsEntry,
    TotalsSummary,
};
