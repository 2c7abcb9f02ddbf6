use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Intensity::Low),
            "Medium" => Ok(Intensity::Medium),
            "High" => Ok(Intensity::High),
            other => Err(format!("unknown intensity '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub exercise_id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub duration_min: i32,
    pub intensity: Intensity,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseFields {
    pub exercise_type: String,
    pub duration_min: i32,
    pub intensity: Intensity,
    pub date: NaiveDate,
}

impl ExerciseFields {
    pub fn into_exercise(self, exercise_id: i64, user_id: i64) -> Exercise {
        Exercise {
            exercise_id,
            user_id,
            exercise_type: self.exercise_type,
            duration_min: self.duration_min,
            intensity: self.intensity,
            date: self.date,
        }
    }
}
