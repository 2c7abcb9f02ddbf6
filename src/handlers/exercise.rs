use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use validator::Validate;
use chrono::NaiveDate;
use log::{debug, info};
use crate::models::exercise::{ExerciseFields, Intensity};
use crate::errors::AppError;
use crate::store::Store;
use crate::utils::jwt::authenticated_user;
use crate::utils::validation::{parse_date, parse_id, validate_payload};

#[derive(Deserialize, Validate)]
pub struct ExerciseRequest {
    #[validate(required(message = "Exercise type is required"))]
    #[validate(length(min = 1, max = 64, message = "Exercise type must be between 1 and 64 characters"))]
    #[serde(rename = "type")]
    exercise_type: Option<String>,

    #[validate(required(message = "Duration is required"))]
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    duration_min: Option<i32>,

    #[validate(required(message = "Intensity is required"))]
    intensity: Option<Intensity>,

    #[validate(required(message = "Date is required"))]
    date: Option<NaiveDate>,
}

impl ExerciseRequest {
    fn into_fields(self) -> Result<ExerciseFields, AppError> {
        validate_payload(&self)?;
        match (self.exercise_type, self.duration_min, self.intensity, self.date) {
            (Some(exercise_type), Some(duration_min), Some(intensity), Some(date)) => Ok(ExerciseFields {
                exercise_type,
                duration_min,
                intensity,
                date,
            }),
            _ => Err(AppError::BadRequest("All fields are required".to_string())),
        }
    }
}

// GET /exercises
pub async fn get_exercises(
    req: HttpRequest,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;

    let exercises = store.list_exercises(user_id).await?;
    if exercises.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    Ok(HttpResponse::Ok().json(exercises))
}

// GET /exercises/date/:date
pub async fn get_exercises_by_date(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let date = parse_date(&date)?;

    let exercises = store.list_exercises_on(user_id, date).await?;
    debug!("User {} has {} exercises on {}", user_id, exercises.len(), date);

    Ok(HttpResponse::Ok().json(exercises))
}

// GET /exercises/:id
pub async fn get_exercise(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    exercise_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let exercise_id = parse_id(&exercise_id, "Exercise")?;

    let exercise = store
        .get_exercise(user_id, exercise_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    Ok(HttpResponse::Ok().json(exercise))
}

// POST /exercises
pub async fn create_exercise(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    payload: web::Json<ExerciseRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let fields = payload.into_inner().into_fields()?;

    let exercise_id = store.insert_exercise(user_id, &fields).await?;
    info!("User {} logged exercise {} on {}", user_id, exercise_id, fields.date);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Exercise created successfully",
        "id": exercise_id,
    })))
}

// PUT /exercises/:id
pub async fn update_exercise(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    exercise_id: web::Path<String>,
    payload: web::Json<ExerciseRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let exercise_id = parse_id(&exercise_id, "Exercise")?;
    let fields = payload.into_inner().into_fields()?;

    if !store.update_exercise(user_id, exercise_id, &fields).await? {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Exercise updated successfully" })))
}

// DELETE /exercises/:id
pub async fn delete_exercise(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    exercise_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let exercise_id = parse_id(&exercise_id, "Exercise")?;

    if !store.delete_exercise(user_id, exercise_id).await? {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Exercise deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};
    use crate::test_utils::{bearer, memory_store, seed_user, test_app, test_config};

    #[actix_web::test]
    async fn exercise_lifecycle() {
        let store = memory_store();
        let (_, token) = seed_user(store.as_ref(), "exercise_owner").await;
        let app = test_app!(test_config(), store.clone());

        let req = test::TestRequest::get().uri("/exercises").insert_header(bearer(&token)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::post()
            .uri("/exercises")
            .insert_header(bearer(&token))
            .set_json(json!({"type": "Cycling", "duration_min": 40, "intensity": "High", "date": "2024-05-06"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri("/exercises/date/2024-05-06")
            .insert_header(bearer(&token))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed[0]["type"], "Cycling");
        assert_eq!(listed[0]["intensity"], "High");
        assert_eq!(listed[0]["exercise_id"], id);

        let req = test::TestRequest::put()
            .uri(&format!("/exercises/{}", id))
            .insert_header(bearer(&token))
            .set_json(json!({"type": "Cycling", "duration_min": 55, "intensity": "Low", "date": "2024-05-06"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/exercises/{}", id))
            .insert_header(bearer(&token))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["duration_min"], 55);
        assert_eq!(fetched["intensity"], "Low");

        let req = test::TestRequest::delete()
            .uri(&format!("/exercises/{}", id))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_intensity_is_reported() {
        let store = memory_store();
        let (_, token) = seed_user(store.as_ref(), "exercise_missing").await;
        let app = test_app!(test_config(), store.clone());

        let req = test::TestRequest::post()
            .uri("/exercises")
            .insert_header(bearer(&token))
            .set_json(json!({"type": "Yoga", "duration_min": 20, "date": "2024-05-06"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Intensity is required");

        let req = test::TestRequest::put()
            .uri("/exercises/12")
            .insert_header(bearer(&token))
            .set_json(json!({"type": "Yoga", "duration_min": 20, "intensity": "Low", "date": "2024-05-06"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
