use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode};
use crate::config::DatabaseConfig;
use crate::models::{
    activity::{Activity, ActivityFields},
    exercise::{Exercise, ExerciseFields},
    meal::{Meal, MealFields},
    user::User,
};
use super::{Store, StoreError, StoreResult};

// Enumerated columns are plain VARCHARs; rows are read as strings and
// converted so a stray value surfaces as `InvalidRow` instead of a decode panic.

#[derive(sqlx::FromRow)]
struct ActivityRow {
    activity_id: i64,
    user_id: i64,
    activity_title: String,
    activity_type: String,
    duration_min: i32,
    date: NaiveDate,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = StoreError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Activity {
            activity_id: row.activity_id,
            user_id: row.user_id,
            title: row.activity_title,
            category: row.activity_type.parse().map_err(StoreError::InvalidRow)?,
            duration_min: row.duration_min,
            date: row.date,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MealRow {
    meal_id: i64,
    user_id: i64,
    #[sqlx(rename = "type")]
    meal_type: String,
    description: String,
    calories: i32,
    date: NaiveDate,
}

impl TryFrom<MealRow> for Meal {
    type Error = StoreError;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        Ok(Meal {
            meal_id: row.meal_id,
            user_id: row.user_id,
            meal_type: row.meal_type.parse().map_err(StoreError::InvalidRow)?,
            description: row.description,
            calories: row.calories,
            date: row.date,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    exercise_id: i64,
    user_id: i64,
    #[sqlx(rename = "type")]
    exercise_type: String,
    duration_min: i32,
    intensity: String,
    date: NaiveDate,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = StoreError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        Ok(Exercise {
            exercise_id: row.exercise_id,
            user_id: row.user_id,
            exercise_type: row.exercise_type,
            duration_min: row.duration_min,
            intensity: row.intensity.parse().map_err(StoreError::InvalidRow)?,
            date: row.date,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        if config.enable_ssl {
            options = options.ssl_mode(MySqlSslMode::VerifyIdentity);
            if let Some(ca_path) = &config.ca_path {
                options = options.ssl_ca(ca_path);
            }
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        info!("Connected to MySQL database at {}:{}", config.host, config.port);
        Ok(MySqlStore::new(pool))
    }

    /// Applies the schema under `migrations/`.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))
    }
}

fn duplicate_or(err: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(what.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for MySqlStore {
    async fn create_user(&self, username: &str, password_hash: &str, name: &str) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO auth (username, `password`, name) VALUES (?, ?, ?)")
            .bind(username)
            .bind(password_hash)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| duplicate_or(e, "Username"))?;

        Ok(result.last_insert_id() as i64)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, `password`, name FROM auth WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_activities(&self, user_id: i64) -> StoreResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT * FROM activities WHERE user_id = ? ORDER BY `date` DESC, activity_id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn list_activities_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT * FROM activities WHERE user_id = ? AND `date` = ? ORDER BY activity_id",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn get_activity(&self, user_id: i64, activity_id: i64) -> StoreResult<Option<Activity>> {
        sqlx::query_as::<_, ActivityRow>("SELECT * FROM activities WHERE activity_id = ? AND user_id = ?")
            .bind(activity_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Activity::try_from)
            .transpose()
    }

    async fn insert_activity(&self, user_id: i64, fields: &ActivityFields) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO activities (user_id, activity_title, activity_type, duration_min, `date`) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&fields.title)
        .bind(fields.category.as_str())
        .bind(fields.duration_min)
        .bind(fields.date)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update_activity(&self, user_id: i64, activity_id: i64, fields: &ActivityFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE activities SET activity_title = ?, activity_type = ?, duration_min = ?, `date` = ? WHERE activity_id = ? AND user_id = ?",
        )
        .bind(&fields.title)
        .bind(fields.category.as_str())
        .bind(fields.duration_min)
        .bind(fields.date)
        .bind(activity_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_activity(&self, user_id: i64, activity_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE activity_id = ? AND user_id = ?")
            .bind(activity_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_meals(&self, user_id: i64) -> StoreResult<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            "SELECT * FROM meals WHERE user_id = ? ORDER BY `date` DESC, meal_id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn list_meals_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            "SELECT * FROM meals WHERE user_id = ? AND `date` = ? ORDER BY meal_id",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn get_meal(&self, user_id: i64, meal_id: i64) -> StoreResult<Option<Meal>> {
        sqlx::query_as::<_, MealRow>("SELECT * FROM meals WHERE meal_id = ? AND user_id = ?")
            .bind(meal_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Meal::try_from)
            .transpose()
    }

    async fn insert_meal(&self, user_id: i64, fields: &MealFields) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO meals (user_id, `type`, description, calories, `date`) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(fields.meal_type.as_str())
        .bind(&fields.description)
        .bind(fields.calories)
        .bind(fields.date)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update_meal(&self, user_id: i64, meal_id: i64, fields: &MealFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE meals SET `type` = ?, description = ?, calories = ?, `date` = ? WHERE meal_id = ? AND user_id = ?",
        )
        .bind(fields.meal_type.as_str())
        .bind(&fields.description)
        .bind(fields.calories)
        .bind(fields.date)
        .bind(meal_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_meal(&self, user_id: i64, meal_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE meal_id = ? AND user_id = ?")
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_exercises(&self, user_id: i64) -> StoreResult<Vec<Exercise>> {
        let rows = sqlx::query_as::<_, ExerciseRow>(
            "SELECT * FROM exercises WHERE user_id = ? ORDER BY `date` DESC, exercise_id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn list_exercises_on(&self, user_id: i64, date: NaiveDate) -> StoreResult<Vec<Exercise>> {
        let rows = sqlx::query_as::<_, ExerciseRow>(
            "SELECT * FROM exercises WHERE user_id = ? AND `date` = ? ORDER BY exercise_id",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn get_exercise(&self, user_id: i64, exercise_id: i64) -> StoreResult<Option<Exercise>> {
        sqlx::query_as::<_, ExerciseRow>("SELECT * FROM exercises WHERE exercise_id = ? AND user_id = ?")
            .bind(exercise_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Exercise::try_from)
            .transpose()
    }

    async fn insert_exercise(&self, user_id: i64, fields: &ExerciseFields) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO exercises (user_id, `type`, duration_min, intensity, `date`) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&fields.exercise_type)
        .bind(fields.duration_min)
        .bind(fields.intensity.as_str())
        .bind(fields.date)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update_exercise(&self, user_id: i64, exercise_id: i64, fields: &ExerciseFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE exercises SET `type` = ?, duration_min = ?, intensity = ?, `date` = ? WHERE exercise_id = ? AND user_id = ?",
        )
        .bind(&fields.exercise_type)
        .bind(fields.duration_min)
        .bind(fields.intensity.as_str())
        .bind(fields.date)
        .bind(exercise_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_exercise(&self, user_id: i64, exercise_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE exercise_id = ? AND user_id = ?")
            .bind(exercise_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
