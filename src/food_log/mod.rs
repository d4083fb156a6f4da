pub mod display;
mod dto;
pub mod repo;
mod services;

pub use dto::{FoodLogEntry, NutrientTotals};
pub use repo::{parse_entries, PersistenceCorruption, FOOD_LOG_KEY};
pub use services::{compute_totals, effective_servings, parse_servings, FoodLog};
