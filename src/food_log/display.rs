use super::dto::{FoodLogEntry, NutrientTotals};
use crate::catalog::FoodItem;

pub fn servings_label(servings: f64) -> String {
    let suffix = if servings > 1.0 { "s" } else { "" };
    format!("{servings} serving{suffix}")
}

pub fn format_food(food: &FoodItem) -> String {
    format!(
        "[{}] {} - {} cal | P: {}g | C: {}g | F: {}g",
        food.id, food.name, food.calories, food.protein, food.carbs, food.fat
    )
}

pub fn format_entry(entry: &FoodLogEntry) -> String {
    format!(
        "#{} {} {} ({}) - {} cal | P: {:.1}g | C: {:.1}g | F: {:.1}g",
        entry.id,
        entry.timestamp,
        entry.name,
        servings_label(entry.servings),
        entry.calories.round(),
        entry.protein,
        entry.carbs,
        entry.fat
    )
}

pub fn format_totals(totals: &NutrientTotals) -> String {
    format!(
        "Total: {} cal | P: {:.1}g | C: {:.1}g | F: {:.1}g",
        totals.calories.round(),
        totals.protein,
        totals.carbs,
        totals.fat
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_only_above_one() {
        assert_eq!(servings_label(1.0), "1 serving");
        assert_eq!(servings_label(0.5), "0.5 serving");
        assert_eq!(servings_label(2.5), "2.5 servings");
    }

    #[test]
    fn totals_round_calories_and_one_decimal_macros() {
        let totals = NutrientTotals {
            calories: 2594.6,
            protein: 120.04,
            carbs: 250.0,
            fat: 70.26,
        };
        assert_eq!(
            format_totals(&totals),
            "Total: 2595 cal | P: 120.0g | C: 250.0g | F: 70.3g"
        );
    }

    #[test]
    fn entry_line() {
        let entry = FoodLogEntry {
            id: 7,
            food_id: 4,
            name: "Banana (medium)".into(),
            servings: 2.0,
            calories: 210.0,
            protein: 2.6,
            carbs: 54.0,
            fat: 0.8,
            timestamp: "09:30".into(),
        };
        assert_eq!(
            format_entry(&entry),
            "#7 09:30 Banana (medium) (2 servings) - 210 cal | P: 2.6g | C: 54.0g | F: 0.8g"
        );
    }
}
