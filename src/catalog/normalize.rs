//! Resolution of nutrient fields on loosely-typed food records.
//!
//! Food data arriving from JSON files or older clients does not agree on key
//! names: `protein`, `Protein`, `PROTEIN` and `prot` all mean the same thing.
//! Lookups walk a fixed precedence list per nutrient and never fail; anything
//! unresolvable degrades to `0`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNKNOWN_FOOD_NAME: &str = "Unknown Food";

/// Canonical nutrient field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
        }
    }

    /// Extra names accepted after the casing variants, first match wins.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Nutrient::Calories => &["cal", "Cal"],
            Nutrient::Protein => &["prot", "Prot"],
            Nutrient::Carbs => &["carbohydrates", "Carbohydrates"],
            Nutrient::Fat => &["fats", "Fats"],
        }
    }

    /// Every key tried before the case-insensitive scan, in precedence order.
    pub fn candidates(self) -> Vec<String> {
        let key = self.key();
        let mut names = vec![
            key.to_string(),
            key.to_lowercase(),
            key.to_uppercase(),
            capitalize(key),
        ];
        names.extend(self.aliases().iter().map(|a| a.to_string()));
        names
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Number coercion with the loose semantics of form input: numeric strings
/// parse, blank strings and `false` are zero, `true` is one.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn present<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

/// Looks a nutrient up on an arbitrary record. Total: non-objects, missing
/// keys and non-numeric values all resolve to `0`.
pub fn resolve_nutrient(record: &Value, nutrient: Nutrient) -> f64 {
    let Some(record) = record.as_object() else {
        return 0.0;
    };

    for name in nutrient.candidates() {
        if let Some(value) = present(record, &name) {
            return coerce_number(value);
        }
    }

    record
        .iter()
        .find(|(k, _)| k.to_lowercase() == nutrient.key())
        .map(|(_, v)| coerce_number(v))
        .unwrap_or(0.0)
}

/// A food record with every field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFood {
    pub id: i64,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn resolve_name(record: &Value) -> String {
    match record.get("name") {
        Some(v) if !is_falsy(v) => match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => UNKNOWN_FOOD_NAME.to_string(),
    }
}

fn resolve_id(record: &Value) -> i64 {
    record
        .get("id")
        .map(coerce_number)
        .map(|n| n.trunc() as i64)
        .unwrap_or(0)
}

/// Builds the canonical shape of a food record; `None` only for absent input.
pub fn normalize_food(record: Option<&Value>) -> Option<NormalizedFood> {
    let record = record.filter(|r| !r.is_null())?;
    Some(NormalizedFood {
        id: resolve_id(record),
        name: resolve_name(record),
        calories: resolve_nutrient(record, Nutrient::Calories),
        protein: resolve_nutrient(record, Nutrient::Protein),
        carbs: resolve_nutrient(record, Nutrient::Carbs),
        fat: resolve_nutrient(record, Nutrient::Fat),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn casing_and_aliases_resolve_like_canonical_key() {
        let variants = [
            ("protein", Nutrient::Protein),
            ("PROTEIN", Nutrient::Protein),
            ("Protein", Nutrient::Protein),
            ("prot", Nutrient::Protein),
            ("Prot", Nutrient::Protein),
            ("carbohydrates", Nutrient::Carbs),
            ("Carbohydrates", Nutrient::Carbs),
            ("CARBS", Nutrient::Carbs),
            ("fats", Nutrient::Fat),
            ("Fats", Nutrient::Fat),
            ("cal", Nutrient::Calories),
            ("Cal", Nutrient::Calories),
            ("Calories", Nutrient::Calories),
        ];
        for (key, nutrient) in variants {
            let mut record = Map::new();
            record.insert(key.to_string(), json!(12.5));
            let canonical = json!({ nutrient.key(): 12.5 });
            assert_eq!(
                resolve_nutrient(&Value::Object(record), nutrient),
                resolve_nutrient(&canonical, nutrient),
                "key {key}"
            );
        }
    }

    #[test]
    fn mixed_case_falls_back_to_scan() {
        let record = json!({ "pRoTeIn": 7 });
        assert_eq!(resolve_nutrient(&record, Nutrient::Protein), 7.0);
    }

    #[test]
    fn unmatched_record_resolves_to_zero() {
        let record = json!({ "name": "Water", "sodium": 4 });
        for n in Nutrient::ALL {
            assert_eq!(resolve_nutrient(&record, n), 0.0);
        }
        assert_eq!(resolve_nutrient(&json!("not an object"), Nutrient::Fat), 0.0);
    }

    #[test]
    fn precedence_prefers_exact_key_then_alias_order() {
        let record = json!({ "carbs": 10, "carbohydrates": 20, "Carbohydrates": 30 });
        assert_eq!(resolve_nutrient(&record, Nutrient::Carbs), 10.0);

        let record = json!({ "Carbohydrates": 30, "carbohydrates": 20 });
        assert_eq!(resolve_nutrient(&record, Nutrient::Carbs), 20.0);
    }

    #[test]
    fn null_values_are_skipped() {
        let record = json!({ "fat": null, "fats": 3 });
        assert_eq!(resolve_nutrient(&record, Nutrient::Fat), 3.0);
    }

    #[test]
    fn scan_takes_first_case_match_even_when_null() {
        let record = json!({ "pRoTeIn": null });
        assert_eq!(resolve_nutrient(&record, Nutrient::Protein), 0.0);

        // "FaT" sorts before "fAt", so the null wins the scan.
        let record = json!({ "fAt": 9, "FaT": null });
        assert_eq!(resolve_nutrient(&record, Nutrient::Fat), 0.0);
    }

    #[test]
    fn first_hit_wins_even_when_not_numeric() {
        let record = json!({ "calories": "lots", "cal": 100 });
        assert_eq!(resolve_nutrient(&record, Nutrient::Calories), 0.0);
    }

    #[test]
    fn strings_and_bools_coerce() {
        assert_eq!(coerce_number(&json!(" 4.5 ")), 4.5);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!([1, 2])), 0.0);
    }

    #[test]
    fn normalize_applies_defaults() {
        assert!(normalize_food(None).is_none());
        assert!(normalize_food(Some(&Value::Null)).is_none());

        let food = normalize_food(Some(&json!({ "Protein": "31", "CALORIES": 165 }))).unwrap();
        assert_eq!(
            food,
            NormalizedFood {
                id: 0,
                name: UNKNOWN_FOOD_NAME.into(),
                calories: 165.0,
                protein: 31.0,
                carbs: 0.0,
                fat: 0.0,
            }
        );
    }

    #[test]
    fn normalize_keeps_id_and_name() {
        let food = normalize_food(Some(&json!({
            "id": "7",
            "name": "Salmon (100g)",
            "calories": 208,
            "protein": 20,
            "carbs": 0,
            "fats": 13
        })))
        .unwrap();
        assert_eq!(food.id, 7);
        assert_eq!(food.name, "Salmon (100g)");
        assert_eq!(food.fat, 13.0);

        let food = normalize_food(Some(&json!({ "id": "abc", "name": "" }))).unwrap();
        assert_eq!(food.id, 0);
        assert_eq!(food.name, UNKNOWN_FOOD_NAME);
    }
}
