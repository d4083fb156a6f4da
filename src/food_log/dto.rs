use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::normalize::{coerce_number, UNKNOWN_FOOD_NAME};

/// One logged food. Nutrient fields are absolute, already scaled by `servings`.
///
/// Deserialization is lenient because the stored log may have been edited by
/// hand: non-numeric values read as `0`, a missing name as the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogEntry {
    #[serde(deserialize_with = "lenient_i64", default)]
    pub id: i64,
    #[serde(deserialize_with = "lenient_i64", default)]
    pub food_id: i64,
    #[serde(deserialize_with = "lenient_name", default = "unknown_name")]
    pub name: String,
    #[serde(deserialize_with = "lenient_servings", default = "one")]
    pub servings: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub calories: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub protein: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub carbs: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub fat: f64,
    /// Time of day the entry was logged, `HH:MM`.
    #[serde(deserialize_with = "lenient_text", default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl std::ops::AddAssign<&FoodLogEntry> for NutrientTotals {
    fn add_assign(&mut self, e: &FoodLogEntry) {
        self.calories += finite_or_zero(e.calories);
        self.protein += finite_or_zero(e.protein);
        self.carbs += finite_or_zero(e.carbs);
        self.fat += finite_or_zero(e.fat);
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn unknown_name() -> String {
    UNKNOWN_FOOD_NAME.to_string()
}

fn one() -> f64 {
    1.0
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(coerce_number(&v))
}

fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(v.as_i64().unwrap_or_else(|| coerce_number(&v).trunc() as i64))
}

fn lenient_servings<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let n = lenient_f64(d)?;
    Ok(if n > 0.0 { n } else { 1.0 })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let name = lenient_text(d)?;
    Ok(if name.is_empty() { unknown_name() } else { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case() {
        let entry = FoodLogEntry {
            id: 1_700_000_000_000,
            food_id: 3,
            name: "Egg (large)".into(),
            servings: 2.0,
            calories: 144.0,
            protein: 12.6,
            carbs: 1.2,
            fat: 9.6,
            timestamp: "08:15".into(),
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["foodId"], 3);
        assert_eq!(v["id"], 1_700_000_000_000_i64);
        assert_eq!(v["timestamp"], "08:15");
    }

    #[test]
    fn corrupted_fields_read_as_defaults() {
        let entry: FoodLogEntry = serde_json::from_value(json!({
            "id": "12",
            "name": null,
            "servings": "abc",
            "calories": "oops",
            "protein": "4.5",
            "carbs": [1],
            "timestamp": 930
        }))
        .unwrap();
        assert_eq!(entry.id, 12);
        assert_eq!(entry.food_id, 0);
        assert_eq!(entry.name, UNKNOWN_FOOD_NAME);
        assert_eq!(entry.servings, 1.0);
        assert_eq!(entry.calories, 0.0);
        assert_eq!(entry.protein, 4.5);
        assert_eq!(entry.carbs, 0.0);
        assert_eq!(entry.fat, 0.0);
        assert_eq!(entry.timestamp, "930");
    }

    #[test]
    fn stored_floats_decode_bit_exact() {
        let fat: f64 = 4.8 * 3.0;
        let text = serde_json::to_string(&json!([{ "id": 1, "fat": fat }])).unwrap();
        let entries: Vec<FoodLogEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(entries[0].fat.to_bits(), fat.to_bits());
    }
}
