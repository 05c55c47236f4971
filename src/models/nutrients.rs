use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// The five tracked nutrients. Calories in kcal, the rest in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl Nutrients {
    /// Multiply every nutrient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
            fiber: self.fiber * factor,
        }
    }

    /// Round every nutrient to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            calories: round_to(self.calories, decimals),
            protein: round_to(self.protein, decimals),
            fat: round_to(self.fat, decimals),
            carbs: round_to(self.carbs, decimals),
            fiber: round_to(self.fiber, decimals),
        }
    }

    /// Values in the fixed (calories, protein, fat, carbs, fiber) order.
    pub fn as_array(&self) -> [f64; 5] {
        [self.calories, self.protein, self.fat, self.carbs, self.fiber]
    }
}

impl Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, other: Nutrients) {
        *self = *self + other;
    }
}

/// Round a float to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234567, 2), 1.23);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(-0.04, 1), -0.0);
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut total = Nutrients::default();
        let item = Nutrients {
            calories: 100.0,
            protein: 5.0,
            fat: 2.0,
            carbs: 10.0,
            fiber: 1.0,
        };
        total += item;
        total += item;
        assert_eq!(total, item.scale(2.0));
    }
}
