//! Persistence boundary for users and their daily records.
//!
//! Handlers only ever talk to `dyn Store`. Which backend sits behind it is
//! decided once at startup from `STORE_BACKEND`.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::models::{
    activity::{Activity, ActivityFields},
    daily_log::DailyLog,
    exercise::{Exercise, ExerciseFields},
    meal::{Meal, MealFields},
    user::User,
};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    Duplicate(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Every record operation is scoped to the owning `user_id`; rows of other
/// users behave as if they did not exist.
#[async_trait]
pub trait Store: Send + Sync {
    // --- Users ---
    async fn create_user(&self, username: &str, password_hash: &str, name: &str) -> StoreResult<i64>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    // --- Activities ---
    async fn list_activities(&self, user_id: i64) -> StoreResult<Vec<Activity>>;
    async fn list_activities_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Activity>>;
    async fn get_activity(&self, user_id: i64, activity_id: i64) -> StoreResult<Option<Activity>>;
    async fn insert_activity(&self, user_id: i64, fields: &ActivityFields) -> StoreResult<i64>;
    async fn update_activity(&self, user_id: i64, activity_id: i64, fields: &ActivityFields) -> StoreResult<bool>;
    async fn delete_activity(&self, user_id: i64, activity_id: i64) -> StoreResult<bool>;

    // --- Meals ---
    async fn list_meals(&self, user_id: i64) -> StoreResult<Vec<Meal>>;
    async fn list_meals_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Meal>>;
    async fn get_meal(&self, user_id: i64, meal_id: i64) -> StoreResult<Option<Meal>>;
    async fn insert_meal(&self, user_id: i64, fields: &MealFields) -> StoreResult<i64>;
    async fn update_meal(&self, user_id: i64, meal_id: i64, fields: &MealFields) -> StoreResult<bool>;
    async fn delete_meal(&self, user_id: i64, meal_id: i64) -> StoreResult<bool>;

    // --- Exercises ---
    async fn list_exercises(&self, user_id: i64) -> StoreResult<Vec<Exercise>>;
    async fn list_exercises_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Exercise>>;
    async fn get_exercise(&self, user_id: i64, exercise_id: i64) -> StoreResult<Option<Exercise>>;
    async fn insert_exercise(&self, user_id: i64, fields: &ExerciseFields) -> StoreResult<i64>;
    async fn update_exercise(&self, user_id: i64, exercise_id: i64, fields: &ExerciseFields) -> StoreResult<bool>;
    async fn delete_exercise(&self, user_id: i64, exercise_id: i64) -> StoreResult<bool>;

    /// All records of one user on one date.
    ///
    /// The three lists are read one after another, so a write racing with
    /// this call may or may not show up in the result.
    async fn fetch_day(&self, user_id: i64, date: NaiveDate) -> StoreResult<DailyLog> {
        Ok(DailyLog {
            activities: self.list_activities_on(user_id, date).await?,
            meals: self.list_meals_on(user_id, date).await?,
            exercises: self.list_exercises_on(user_id, date).await?,
        })
    }
}
