use std::sync::Arc;

use time::{macros::format_description, OffsetDateTime};
use tracing::{debug, info, warn};

use super::dto::{finite_or_zero, FoodLogEntry, NutrientTotals};
use super::repo::{load_entries, save_entries};
use crate::catalog::NormalizedFood;
use crate::storage::{KeyValueStore, StorageError};

/// Servings fall back to one unless a finite positive number was given.
pub fn effective_servings(servings: Option<f64>) -> f64 {
    match servings {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => 1.0,
    }
}

/// Reads a servings field typed by hand; text that is not a number counts as
/// not given, so it falls back to one serving.
pub fn parse_servings(text: Option<&str>) -> Option<f64> {
    text.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Sums every entry. Always recomputed from the entries themselves.
pub fn compute_totals(entries: &[FoodLogEntry]) -> NutrientTotals {
    entries.iter().fold(NutrientTotals::default(), |mut acc, e| {
        acc += e;
        acc
    })
}

fn time_of_day(now: OffsetDateTime) -> String {
    now.format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

fn unix_millis(now: OffsetDateTime) -> i64 {
    (now.unix_timestamp_nanos() / 1_000_000) as i64
}

impl FoodLogEntry {
    pub fn from_food(food: &NormalizedFood, servings: f64, id: i64, timestamp: String) -> Self {
        Self {
            id,
            food_id: food.id,
            name: food.name.clone(),
            servings,
            calories: finite_or_zero(food.calories * servings),
            protein: finite_or_zero(food.protein * servings),
            carbs: finite_or_zero(food.carbs * servings),
            fat: finite_or_zero(food.fat * servings),
            timestamp,
        }
    }
}

/// The session's food log, held in memory and written back in full to the
/// key-value store after every mutation.
pub struct FoodLog {
    store: Arc<dyn KeyValueStore>,
    key: String,
    entries: Vec<FoodLogEntry>,
}

impl FoodLog {
    pub async fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = load_entries(store.as_ref(), &key).await;
        debug!(key = %key, entries = entries.len(), "food log loaded");
        Self {
            store,
            key,
            entries,
        }
    }

    pub fn entries(&self) -> &[FoodLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn totals(&self) -> NutrientTotals {
        compute_totals(&self.entries)
    }

    /// Ids follow creation time in milliseconds and stay strictly increasing
    /// within the log even when two adds land in the same millisecond.
    fn next_id(&self, now: OffsetDateTime) -> i64 {
        let last = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        unix_millis(now).max(last.saturating_add(1))
    }

    pub async fn add_entry(
        &mut self,
        food: &NormalizedFood,
        servings: Option<f64>,
    ) -> Result<FoodLogEntry, StorageError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.add_entry_at(food, servings, now).await
    }

    pub async fn add_entry_at(
        &mut self,
        food: &NormalizedFood,
        servings: Option<f64>,
        now: OffsetDateTime,
    ) -> Result<FoodLogEntry, StorageError> {
        let servings = effective_servings(servings);
        let entry = FoodLogEntry::from_food(food, servings, self.next_id(now), time_of_day(now));

        self.entries.push(entry.clone());
        if let Err(e) = self.persist().await {
            self.entries.pop();
            return Err(e);
        }
        info!(id = entry.id, food_id = entry.food_id, servings, "food logged");
        Ok(entry)
    }

    /// Drops every entry carrying `id`. `Ok(false)` when none does; the log
    /// is left untouched.
    pub async fn remove_entry(&mut self, id: i64) -> Result<bool, StorageError> {
        if !self.entries.iter().any(|e| e.id == id) {
            warn!(id, "no food log entry to remove");
            return Ok(false);
        }

        let previous = self.entries.clone();
        self.entries.retain(|e| e.id != id);
        if let Err(e) = self.persist().await {
            self.entries = previous;
            return Err(e);
        }
        info!(id, remaining = self.entries.len(), "food log entry removed");
        Ok(true)
    }

    async fn persist(&self) -> Result<(), StorageError> {
        save_entries(self.store.as_ref(), &self.key, &self.entries).await
    }
}
