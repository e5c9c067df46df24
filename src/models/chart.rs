//! Chart descriptions handed to the browser.
//!
//! The shapes follow plotly's figure JSON (`data` traces plus a `layout`)
//! so the front-end can pass them straight to `Plotly.react`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartFigure {
    pub data: Vec<Trace>,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Marker {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarkerLine {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartLayout {
    pub title: ChartTitle,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartTitle {
    pub text: String,
    /// Horizontal position, 0.5 centres the title
    pub x: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Axis {
    pub title: String,
    /// `[lower, upper]`; absent lets the chart autoscale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<f64>>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, lower: f64, upper: f64) -> Self {
        self.range = Some(vec![lower, upper]);
        self
    }
}

impl ChartLayout {
    pub fn centered(title: impl Into<String>) -> Self {
        Self {
            title: ChartTitle {
                text: title.into(),
                x: 0.5,
                y: None,
            },
            xaxis: Axis::default(),
            yaxis: Axis::default(),
            template: None,
            plot_bgcolor: None,
        }
    }
}

impl Trace {
    pub fn bar(x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Bar,
            name: None,
            mode: None,
            x,
            y,
            marker: None,
        }
    }

    pub fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            name: Some(name.into()),
            mode: Some("lines".to_string()),
            x,
            y,
            marker: None,
        }
    }
}
