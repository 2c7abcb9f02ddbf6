use serde::Serialize;
use chrono::NaiveDate;
use crate::models::{activity::Activity, exercise::Exercise, meal::Meal};

/// Everything one user logged on one date. Built on read, never stored.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DailyLog {
    pub activities: Vec<Activity>,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
}

impl DailyLog {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.meals.is_empty() && self.exercises.is_empty()
    }
}

#[derive(Serialize, Debug)]
pub struct DaySummary {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub log: DailyLog,
    pub score: crate::wellness::ScoreReport,
}
