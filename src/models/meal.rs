use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(MealType::Breakfast),
            "Lunch" => Ok(MealType::Lunch),
            "Dinner" => Ok(MealType::Dinner),
            "Snack" => Ok(MealType::Snack),
            other => Err(format!("unknown meal type '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Meal {
    pub meal_id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub description: String,
    pub calories: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealFields {
    pub meal_type: MealType,
    pub description: String,
    pub calories: i32,
    pub date: NaiveDate,
}

impl MealFields {
    pub fn into_meal(self, meal_id: i64, user_id: i64) -> Meal {
        Meal {
            meal_id,
            user_id,
            meal_type: self.meal_type,
            description: self.description,
            calories: self.calories,
            date: self.date,
        }
    }
}
