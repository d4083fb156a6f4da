use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::dto::FoodLogEntry;
use crate::storage::{KeyValueStore, StorageError};

pub const FOOD_LOG_KEY: &str = "nutrition_food_log";

/// The stored log could not be read as a list of entries. Always recovered
/// locally by starting from an empty log.
#[derive(Debug, Error)]
pub enum PersistenceCorruption {
    #[error("stored food log is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("stored food log is not a list")]
    NotAList,
}

/// Decodes a stored log. `null` reads as empty; elements that are not objects
/// are dropped.
pub fn parse_entries(text: &str) -> Result<Vec<FoodLogEntry>, PersistenceCorruption> {
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(PersistenceCorruption::NotAList),
    };

    let mut entries = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(idx, "dropping non-object food log element");
            continue;
        }
        match serde_json::from_value::<FoodLogEntry>(item) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(idx, error = %e, "dropping unreadable food log element"),
        }
    }
    Ok(entries)
}

/// Reads the full log. Never fails: absent, unreadable or corrupt data all
/// yield an empty log.
pub async fn load_entries(store: &dyn KeyValueStore, key: &str) -> Vec<FoodLogEntry> {
    let text = match store.load(key).await {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "food log unreadable, starting empty");
            return Vec::new();
        }
    };
    parse_entries(&text).unwrap_or_else(|e| {
        warn!(key, error = %e, "food log corrupt, starting empty");
        Vec::new()
    })
}

pub async fn save_entries(
    store: &dyn KeyValueStore,
    key: &str,
    entries: &[FoodLogEntry],
) -> Result<(), StorageError> {
    let text = serde_json::to_string(entries).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &text).await
}
