//! Fixtures shared by the unit and handler tests.

#![cfg(test)]

use std::sync::Arc;
use chrono::NaiveDate;
use crate::config::{Config, StoreBackend};
use crate::models::{
    activity::{Activity, ActivityCategory, ActivityFields},
    exercise::{Exercise, ExerciseFields, Intensity},
    meal::{Meal, MealFields, MealType},
};
use crate::store::{MemoryStore, Store};
use crate::utils::jwt::generate_token;

pub const TEST_SECRET: &str = "test-secret";

/// A date in May 2024.
pub fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, n).unwrap()
}

pub fn activities(count: usize) -> Vec<Activity> {
    (0..count)
        .map(|i| activity_fields(30, day(1)).into_activity(i as i64 + 1, 1))
        .collect()
}

pub fn meal(calories: i32) -> Meal {
    meal_fields(MealType::Snack, calories, day(1)).into_meal(1, 1)
}

pub fn exercise(minutes: i32) -> Exercise {
    exercise_fields(minutes, day(1)).into_exercise(1, 1)
}

pub fn activity_fields(duration_min: i32, date: NaiveDate) -> ActivityFields {
    ActivityFields {
        title: "Deep work".to_string(),
        category: ActivityCategory::Work,
        duration_min,
        date,
    }
}

pub fn meal_fields(meal_type: MealType, calories: i32, date: NaiveDate) -> MealFields {
    MealFields {
        meal_type,
        description: "Rice and beans".to_string(),
        calories,
        date,
    }
}

pub fn exercise_fields(duration_min: i32, date: NaiveDate) -> ExerciseFields {
    ExerciseFields {
        exercise_type: "Running".to_string(),
        duration_min,
        intensity: Intensity::Medium,
        date,
    }
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_minutes: 60,
        bcrypt_cost: 4,
        store_backend: StoreBackend::Memory,
        database: None,
        workers: 1,
    }
}

pub fn memory_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

/// Creates a user directly in the store and returns its id with a valid bearer token.
pub async fn seed_user(store: &dyn Store, username: &str) -> (i64, String) {
    let user_id = store.create_user(username, "unused-hash", "Test User").await.unwrap();
    let token = generate_token(user_id, TEST_SECRET, 60).unwrap();
    (user_id, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Builds the full application around `config` and `store`.
macro_rules! test_app {
    ($config:expr, $store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($config))
                .app_data(actix_web::web::Data::from($store))
                .configure(crate::routes::configure),
        )
        .await
    };
}

pub(crate) use test_app;
