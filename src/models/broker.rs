use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// One entry of the management API queue listing.
///
/// Only the fields the dashboard reads are kept. RabbitMQ omits `messages`,
/// or sends `null`, for queues whose stats have not been collected yet.
/// Both read as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueueInfo {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub messages: u64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_messages_reads_zero() {
        let queues: Vec<QueueInfo> = serde_json::from_value(json!([
            {"name": "busy", "messages": 9},
            {"name": "idle", "messages": null},
            {"name": "fresh"}
        ]))
        .unwrap();

        let depths: Vec<u64> = queues.iter().map(|q| q.messages).collect();
        assert_eq!(depths, vec![9, 0, 0]);
    }
}
