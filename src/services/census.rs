//! Collection census: document count of every collection, refreshed per tick.

use tracing::debug;

use crate::constants::charts::{COLLECTIONS_TITLE, PLOT_BACKGROUND, TRANSACTIONS_AXIS};
use crate::database::{DocumentStore, StoreResult};
use crate::models::{Axis, ChartFigure, ChartLayout, CollectionCount, Trace};

/// Count documents in every collection, in the order the server lists them.
///
/// One count query per collection; the first failure aborts the census.
pub async fn fetch_collection_counts(store: &dyn DocumentStore) -> StoreResult<Vec<CollectionCount>> {
    let names = store.list_collection_names().await?;
    let mut counts = Vec::with_capacity(names.len());

    for name in names {
        let count = store.count_documents(&name).await?;
        counts.push(CollectionCount { name, count });
    }

    debug!(collections = counts.len(), "Collection census complete");
    Ok(counts)
}

pub fn render_collections_chart(counts: &[CollectionCount]) -> ChartFigure {
    let x = counts.iter().map(|c| c.name.clone()).collect();
    let y = counts.iter().map(|c| c.count as f64).collect();

    let mut layout = ChartLayout::centered(COLLECTIONS_TITLE);
    layout.yaxis = Axis::titled(TRANSACTIONS_AXIS);
    layout.plot_bgcolor = Some(PLOT_BACKGROUND.to_string());

    ChartFigure {
        data: vec![Trace::bar(x, y)],
        layout,
    }
}
