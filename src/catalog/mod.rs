mod data;
pub mod handlers;
pub mod normalize;

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::{info, warn};

use crate::state::AppState;
use axum::Router;

pub use data::{FoodItem, RejectedFood, BUILTIN_FOODS};
pub use normalize::{normalize_food, resolve_nutrient, NormalizedFood, Nutrient};

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}

/// Read-only table of known foods, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<FoodItem>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            items: BUILTIN_FOODS.clone(),
        }
    }

    /// Parses a JSON array of food records. Each record goes through the
    /// normalizer; records without a usable positive id, with negative
    /// nutrients, or repeating an earlier id are skipped.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let records: Vec<Value> =
            serde_json::from_str(text).context("catalog must be a JSON array of foods")?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let Some(food) = normalize_food(Some(record)) else {
                warn!(idx, "skipping null catalog record");
                continue;
            };
            match FoodItem::try_from(food) {
                Ok(item) if seen.insert(item.id) => items.push(item),
                Ok(item) => warn!(idx, id = item.id, "skipping duplicate catalog id"),
                Err(e) => warn!(idx, error = %e, "skipping catalog record"),
            }
        }
        Ok(Self { items })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&text)?;
        info!(path = %path.display(), foods = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_env_path(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&FoodItem> {
        self.items.iter().find(|f| f.id == id)
    }

    /// Case-insensitive substring match on the name. A blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&FoodItem> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&term))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
