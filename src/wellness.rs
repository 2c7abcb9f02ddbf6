//! Daily wellness score.
//!
//! A day's score is the sum of four contributions, each capped and rounded on
//! its own before they are added up. The sum is capped at 100 afterwards, so
//! the per-category rounding never pushes the result out of range.

use serde::Serialize;
use crate::models::{activity::Activity, daily_log::DailyLog, exercise::Exercise, meal::Meal};

const ACTIVITY_TARGET: f64 = 5.0;
const ACTIVITY_MAX: f64 = 25.0;

const EXERCISE_TARGET_MIN: f64 = 30.0;
const EXERCISE_MAX: f64 = 50.0;

const MEAL_TARGET: f64 = 3.0;
const MEAL_MAX: f64 = 10.0;

const SCORE_MAX: f64 = 100.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub activity_count: usize,
    pub exercise_minutes: i64,
    pub meal_count: usize,
    pub total_calories: i64,
    pub activity: u8,
    pub exercise: u8,
    pub meal_count_points: u8,
    pub calorie_band: u8,
    pub score: u8,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Excellent,
    Good,
    KeepGoing,
    NeedsWork,
    GetActive,
}

impl ScoreStatus {
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreStatus::Excellent,
            60..=79 => ScoreStatus::Good,
            40..=59 => ScoreStatus::KeepGoing,
            20..=39 => ScoreStatus::NeedsWork,
            _ => ScoreStatus::GetActive,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreStatus::Excellent => "Excellent!",
            ScoreStatus::Good => "Good Job!",
            ScoreStatus::KeepGoing => "Keep Going!",
            ScoreStatus::NeedsWork => "Needs Work",
            ScoreStatus::GetActive => "Get Active!",
        }
    }
}

/// Breakdown plus the status tier, as returned to clients.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
    pub status: ScoreStatus,
    pub message: &'static str,
}

impl From<ScoreBreakdown> for ScoreReport {
    fn from(breakdown: ScoreBreakdown) -> Self {
        let status = ScoreStatus::for_score(breakdown.score);
        ScoreReport {
            breakdown,
            status,
            message: status.message(),
        }
    }
}

/// Points for the day's calorie total.
pub fn calorie_band(total_calories: i64) -> u8 {
    match total_calories {
        1800..=2500 => 15,
        1500..=3000 => 10,
        1200..=3500 => 5,
        t if t > 0 => 2,
        _ => 0,
    }
}

// min(value, cap) rounded half up, never below zero.
fn capped(value: f64, cap: f64) -> u8 {
    value.min(cap).max(0.0).round() as u8
}

pub fn breakdown(activities: &[Activity], meals: &[Meal], exercises: &[Exercise]) -> ScoreBreakdown {
    let activity_count = activities.len();
    let meal_count = meals.len();
    let exercise_minutes: i64 = exercises.iter().map(|e| i64::from(e.duration_min)).sum();
    let total_calories: i64 = meals.iter().map(|m| i64::from(m.calories)).sum();

    let activity = capped(activity_count as f64 / ACTIVITY_TARGET * ACTIVITY_MAX, ACTIVITY_MAX);
    let exercise = capped(
        exercise_minutes as f64 / EXERCISE_TARGET_MIN * EXERCISE_MAX,
        EXERCISE_MAX,
    );
    let meal_count_points = capped(meal_count as f64 / MEAL_TARGET * MEAL_MAX, MEAL_MAX);
    let calories = calorie_band(total_calories);

    let sum = f64::from(activity) + f64::from(exercise) + f64::from(meal_count_points) + f64::from(calories);

    ScoreBreakdown {
        activity_count,
        exercise_minutes,
        meal_count,
        total_calories,
        activity,
        exercise,
        meal_count_points,
        calorie_band: calories,
        score: capped(sum, SCORE_MAX),
    }
}

/// Wellness score in `0..=100` for one day's records.
pub fn compute_score(activities: &[Activity], meals: &[Meal], exercises: &[Exercise]) -> u8 {
    breakdown(activities, meals, exercises).score
}

pub fn score_day(log: &DailyLog) -> ScoreReport {
    breakdown(&log.activities, &log.meals, &log.exercises).into()
}
