//! In-process store with the same contract as the MySQL one. Data lives only
//! as long as the process.

use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use crate::models::{
    activity::{Activity, ActivityFields},
    exercise::{Exercise, ExerciseFields},
    meal::{Meal, MealFields},
    user::User,
};
use super::{Store, StoreError, StoreResult};

trait OwnedRecord: Clone {
    fn owner(&self) -> i64;
    fn date(&self) -> NaiveDate;
}

impl OwnedRecord for Activity {
    fn owner(&self) -> i64 {
        self.user_id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl OwnedRecord for Meal {
    fn owner(&self) -> i64 {
        self.user_id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl OwnedRecord for Exercise {
    fn owner(&self) -> i64 {
        self.user_id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Rows keyed by id. Ids start at 1 and are never reused.
struct Table<T> {
    last_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table { last_id: 0, rows: BTreeMap::new() }
    }
}

impl<T: OwnedRecord> Table<T> {
    /// Newest date first, ties broken by newest id.
    fn list(&self, user_id: i64) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = self
            .rows
            .iter()
            .filter(|(_, row)| row.owner() == user_id)
            .map(|(id, row)| (*id, row.clone()))
            .collect();
        rows.sort_by(|(a_id, a), (b_id, b)| b.date().cmp(&a.date()).then(b_id.cmp(a_id)));
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn list_on(&self, user_id: i64, date: NaiveDate) -> Vec<T> {
        self.rows
            .values()
            .filter(|row| row.owner() == user_id && row.date() == date)
            .cloned()
            .collect()
    }

    fn get(&self, user_id: i64, id: i64) -> Option<T> {
        self.rows.get(&id).filter(|row| row.owner() == user_id).cloned()
    }

    fn insert(&mut self, build: impl FnOnce(i64) -> T) -> i64 {
        self.last_id += 1;
        let id = self.last_id;
        self.rows.insert(id, build(id));
        id
    }

    fn update(&mut self, user_id: i64, id: i64, build: impl FnOnce() -> T) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) if row.owner() == user_id => {
                *row = build();
                true
            }
            _ => false,
        }
    }

    fn delete(&mut self, user_id: i64, id: i64) -> bool {
        if self.get(user_id, id).is_none() {
            return false;
        }
        self.rows.remove(&id).is_some()
    }
}

#[derive(Default)]
struct Tables {
    last_user_id: i64,
    users: BTreeMap<String, User>,
    activities: Table<Activity>,
    meals: Table<Meal>,
    exercises: Table<Exercise>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str, name: &str) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(username) {
            return Err(StoreError::Duplicate("Username".to_string()));
        }
        tables.last_user_id += 1;
        let user_id = tables.last_user_id;
        tables.users.insert(
            username.to_string(),
            User {
                user_id,
                username: username.to_string(),
                password: password_hash.to_string(),
                name: name.to_string(),
            },
        );
        Ok(user_id)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(username).cloned())
    }

    async fn list_activities(&self, user_id: i64) -> StoreResult<Vec<Activity>> {
        Ok(self.tables.read().await.activities.list(user_id))
    }

    async fn list_activities_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Activity>> {
        Ok(self.tables.read().await.activities.list_on(user_id, date))
    }

    async fn get_activity(&self, user_id: i64, activity_id: i64) -> StoreResult<Option<Activity>> {
        Ok(self.tables.read().await.activities.get(user_id, activity_id))
    }

    async fn insert_activity(&self, user_id: i64, fields: &ActivityFields) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        Ok(tables.activities.insert(|id| fields.clone().into_activity(id, user_id)))
    }

    async fn update_activity(&self, user_id: i64, activity_id: i64, fields: &ActivityFields) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .activities
            .update(user_id, activity_id, || fields.clone().into_activity(activity_id, user_id)))
    }

    async fn delete_activity(&self, user_id: i64, activity_id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.activities.delete(user_id, activity_id))
    }

    async fn list_meals(&self, user_id: i64) -> StoreResult<Vec<Meal>> {
        Ok(self.tables.read().await.meals.list(user_id))
    }

    async fn list_meals_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Meal>> {
        Ok(self.tables.read().await.meals.list_on(user_id, date))
    }

    async fn get_meal(&self, user_id: i64, meal_id: i64) -> StoreResult<Option<Meal>> {
        Ok(self.tables.read().await.meals.get(user_id, meal_id))
    }

    async fn insert_meal(&self, user_id: i64, fields: &MealFields) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        Ok(tables.meals.insert(|id| fields.clone().into_meal(id, user_id)))
    }

    async fn update_meal(&self, user_id: i64, meal_id: i64, fields: &MealFields) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.meals.update(user_id, meal_id, || fields.clone().into_meal(meal_id, user_id)))
    }

    async fn delete_meal(&self, user_id: i64, meal_id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.meals.delete(user_id, meal_id))
    }

    async fn list_exercises(&self, user_id: i64) -> StoreResult<Vec<Exercise>> {
        Ok(self.tables.read().await.exercises.list(user_id))
    }

    async fn list_exercises_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Exercise>> {
        Ok(self.tables.read().await.exercises.list_on(user_id, date))
    }

    async fn get_exercise(&self, user_id: i64, exercise_id: i64) -> StoreResult<Option<Exercise>> {
        Ok(self.tables.read().await.exercises.get(user_id, exercise_id))
    }

    async fn insert_exercise(&self, user_id: i64, fields: &ExerciseFields) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        Ok(tables.exercises.insert(|id| fields.clone().into_exercise(id, user_id)))
    }

    async fn update_exercise(&self, user_id: i64, exercise_id: i64, fields: &ExerciseFields) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .exercises
            .update(user_id, exercise_id, || fields.clone().into_exercise(exercise_id, user_id)))
    }

    async fn delete_exercise(&self, user_id: i64, exercise_id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.exercises.delete(user_id, exercise_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meal::MealType;
    use crate::test_utils::{activity_fields, day, exercise_fields, meal_fields};

    #[tokio::test]
    async fn usernames_are_unique() {
        let store = MemoryStore::new();
        let first = store.create_user("mara", "hash", "Mara").await.unwrap();
        assert_eq!(first, 1);
        let err = store.create_user("mara", "other", "Mara Two").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        let user = store.find_user_by_username("mara").await.unwrap().unwrap();
        assert_eq!(user.user_id, 1);
        assert_eq!(user.password, "hash");
        assert!(store.find_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn records_are_scoped_to_their_owner() {
        let store = MemoryStore::new();
        let id = store.insert_meal(1, &meal_fields(MealType::Lunch, 600, day(3))).await.unwrap();

        assert!(store.get_meal(2, id).await.unwrap().is_none());
        assert!(!store.update_meal(2, id, &meal_fields(MealType::Snack, 1, day(3))).await.unwrap());
        assert!(!store.delete_meal(2, id).await.unwrap());
        assert!(store.list_meals(2).await.unwrap().is_empty());

        let meal = store.get_meal(1, id).await.unwrap().unwrap();
        assert_eq!(meal.meal_type, MealType::Lunch);
        assert_eq!(meal.calories, 600);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        let older = store.insert_activity(1, &activity_fields(30, day(1))).await.unwrap();
        let newer = store.insert_activity(1, &activity_fields(30, day(5))).await.unwrap();
        let same_day = store.insert_activity(1, &activity_fields(10, day(5))).await.unwrap();

        let ids: Vec<i64> = store
            .list_activities(1)
            .await
            .unwrap()
            .iter()
            .map(|a| a.activity_id)
            .collect();
        assert_eq!(ids, vec![same_day, newer, older]);
    }

    #[tokio::test]
    async fn update_and_delete_report_whether_a_row_matched() {
        let store = MemoryStore::new();
        let id = store.insert_exercise(7, &exercise_fields(20, day(2))).await.unwrap();

        assert!(store.update_exercise(7, id, &exercise_fields(45, day(4))).await.unwrap());
        let updated = store.get_exercise(7, id).await.unwrap().unwrap();
        assert_eq!(updated.duration_min, 45);
        assert_eq!(updated.date, day(4));

        assert!(store.delete_exercise(7, id).await.unwrap());
        assert!(!store.delete_exercise(7, id).await.unwrap());
        assert!(!store.update_exercise(7, id, &exercise_fields(1, day(4))).await.unwrap());
    }

    #[tokio::test]
    async fn fetch_day_collects_one_date() {
        let store = MemoryStore::new();
        store.insert_activity(1, &activity_fields(30, day(10))).await.unwrap();
        store.insert_activity(1, &activity_fields(30, day(11))).await.unwrap();
        store.insert_meal(1, &meal_fields(MealType::Dinner, 800, day(10))).await.unwrap();
        store.insert_exercise(1, &exercise_fields(25, day(10))).await.unwrap();
        store.insert_exercise(2, &exercise_fields(25, day(10))).await.unwrap();

        let log = store.fetch_day(1, day(10)).await.unwrap();
        assert_eq!(log.activities.len(), 1);
        assert_eq!(log.meals.len(), 1);
        assert_eq!(log.exercises.len(), 1);
        assert!(store.fetch_day(1, day(12)).await.unwrap().is_empty());
    }
}
