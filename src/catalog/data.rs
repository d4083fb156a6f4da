use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::normalize::NormalizedFood;

/// A catalog food; nutrient values are per single serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodItem {
    fn new(id: i64, name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            calories,
            protein,
            carbs,
            fat,
        }
    }
}

impl From<&FoodItem> for NormalizedFood {
    fn from(f: &FoodItem) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            calories: f.calories,
            protein: f.protein,
            carbs: f.carbs,
            fat: f.fat,
        }
    }
}

/// Why a normalized record cannot become a catalog entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectedFood {
    #[error("food id must be positive, got {0}")]
    NonPositiveId(i64),
    #[error("food {id} has a negative {field}")]
    NegativeNutrient { id: i64, field: &'static str },
}

impl TryFrom<NormalizedFood> for FoodItem {
    type Error = RejectedFood;

    fn try_from(f: NormalizedFood) -> Result<Self, Self::Error> {
        if f.id <= 0 {
            return Err(RejectedFood::NonPositiveId(f.id));
        }
        for (field, value) in [
            ("calories", f.calories),
            ("protein", f.protein),
            ("carbs", f.carbs),
            ("fat", f.fat),
        ] {
            if value < 0.0 {
                return Err(RejectedFood::NegativeNutrient { id: f.id, field });
            }
        }
        Ok(Self {
            id: f.id,
            name: f.name,
            calories: f.calories,
            protein: f.protein,
            carbs: f.carbs,
            fat: f.fat,
        })
    }
}

lazy_static! {
    pub static ref BUILTIN_FOODS: Vec<FoodItem> = vec![
        FoodItem::new(1, "Chicken Breast (100g)", 165.0, 31.0, 0.0, 3.6),
        FoodItem::new(2, "White Rice (1 cup)", 205.0, 4.3, 45.0, 0.4),
        FoodItem::new(3, "Egg (large)", 72.0, 6.3, 0.6, 4.8),
        FoodItem::new(4, "Banana (medium)", 105.0, 1.3, 27.0, 0.4),
        FoodItem::new(5, "Protein Shake (1 scoop)", 120.0, 24.0, 3.0, 1.0),
        FoodItem::new(6, "Broccoli (100g)", 34.0, 2.8, 7.0, 0.4),
        FoodItem::new(7, "Salmon (100g)", 208.0, 20.0, 0.0, 13.0),
        FoodItem::new(8, "Apple (medium)", 95.0, 0.5, 25.0, 0.3),
        FoodItem::new(9, "Almonds (28g)", 164.0, 6.0, 6.0, 14.0),
        FoodItem::new(10, "Greek Yogurt (100g)", 59.0, 10.0, 3.6, 0.4),
        FoodItem::new(11, "Avocado (whole)", 240.0, 3.0, 12.0, 22.0),
        FoodItem::new(12, "Oatmeal (1 cup)", 158.0, 6.0, 27.0, 3.0),
        FoodItem::new(13, "Ground Beef (100g)", 250.0, 26.0, 0.0, 17.0),
        FoodItem::new(14, "Sweet Potato (medium)", 103.0, 2.3, 24.0, 0.2),
        FoodItem::new(15, "Milk (1 cup)", 149.0, 8.0, 12.0, 8.0),
    ];
}
