//! Queue table and queue totals panels.

use serde_json::Value;

use crate::constants::charts::{
    QUEUES_UNAVAILABLE, QUEUE_MESSAGES_COLUMN, QUEUE_NAME_COLUMN, TOTALS_UNAVAILABLE,
};
use crate::models::{QueueInfo, QueueRow, QueueTable, TotalsEntry, TotalsSummary};

const STANDARD_TOTALS: [&str; 3] = ["messages", "messages_ready", "messages_unacknowledged"];

/// Table with one row per queue, in listing order.
///
/// An empty listing means the broker could not be read, so it renders as the
/// unavailable message rather than a table without rows.
pub fn render_queue_table(queues: &[QueueInfo]) -> QueueTable {
    if queues.is_empty() {
        return QueueTable::Unavailable {
            message: QUEUES_UNAVAILABLE.to_string(),
        };
    }

    QueueTable::Available {
        columns: vec![
            QUEUE_NAME_COLUMN.to_string(),
            QUEUE_MESSAGES_COLUMN.to_string(),
        ],
        rows: queues
            .iter()
            .map(|q| QueueRow {
                name: q.name.clone(),
                messages: q.messages,
            })
            .collect(),
    }
}

/// Key/value summary of `queue_totals`, or unavailable when the overview
/// could not be fetched.
///
/// The standard counters always appear first, reading 0 when the broker
/// omits them. Any further keys follow in the order the broker sent them.
pub fn render_queue_totals(overview: Option<&Value>) -> TotalsSummary {
    let Some(overview) = overview else {
        return TotalsSummary::Unavailable {
            message: TOTALS_UNAVAILABLE.to_string(),
        };
    };

    let totals = overview.get("queue_totals").and_then(Value::as_object);
    let zero = Value::from(0);

    let mut entries: Vec<TotalsEntry> = STANDARD_TOTALS
        .iter()
        .map(|key| TotalsEntry {
            key: key.to_string(),
            value: display_value(totals.and_then(|t| t.get(*key)).unwrap_or(&zero)),
        })
        .collect();

    if let Some(totals) = totals {
        entries.extend(
            totals
                .iter()
                .filter(|(key, _)| !STANDARD_TOTALS.contains(&key.as_str()))
                .map(|(key, value)| TotalsEntry {
                    key: key.clone(),
                    value: display_value(value),
                }),
        );
    }

    TotalsSummary::Available { entries }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => group_thousands(&i.to_string()),
            (None, Some(f)) => {
                let text = f.to_string();
                match text.split_once('.') {
                    Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
                    None => group_thousands(&text),
                }
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Insert `,` every three digits of an integer rendering
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}
