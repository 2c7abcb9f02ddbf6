use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use validator::Validate;
use chrono::NaiveDate;
use log::{debug, info};
use crate::models::activity::{ActivityCategory, ActivityFields};
use crate::errors::AppError;
use crate::store::Store;
use crate::utils::jwt::authenticated_user;
use crate::utils::validation::{parse_date, parse_id, validate_payload};

#[derive(Deserialize, Validate)]
pub struct ActivityRequest {
    #[validate(required(message = "Activity title is required"))]
    #[validate(length(min = 1, max = 255, message = "Activity title must be between 1 and 255 characters"))]
    activity_title: Option<String>,

    #[validate(required(message = "Activity type is required"))]
    activity_type: Option<ActivityCategory>,

    #[validate(required(message = "Duration is required"))]
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    duration_min: Option<i32>,

    #[validate(required(message = "Date is required"))]
    date: Option<NaiveDate>,
}

impl ActivityRequest {
    fn into_fields(self) -> Result<ActivityFields, AppError> {
        validate_payload(&self)?;
        match (self.activity_title, self.activity_type, self.duration_min, self.date) {
            (Some(title), Some(category), Some(duration_min), Some(date)) => Ok(ActivityFields {
                title,
                category,
                duration_min,
                date,
            }),
            _ => Err(AppError::BadRequest("All fields are required".to_string())),
        }
    }
}

// GET /activities
pub async fn get_activities(
    req: HttpRequest,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;

    let activities = store.list_activities(user_id).await?;
    if activities.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    Ok(HttpResponse::Ok().json(activities))
}

// GET /activities/date/:date
pub async fn get_activities_by_date(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let date = parse_date(&date)?;

    let activities = store.list_activities_on(user_id, date).await?;
    debug!("User {} has {} activities on {}", user_id, activities.len(), date);

    Ok(HttpResponse::Ok().json(activities))
}

// GET /activities/:id
pub async fn get_activity(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    activity_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let activity_id = parse_id(&activity_id, "Activity")?;

    let activity = store
        .get_activity(user_id, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(HttpResponse::Ok().json(activity))
}

// POST /activities
pub async fn create_activity(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    payload: web::Json<ActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let fields = payload.into_inner().into_fields()?;

    let activity_id = store.insert_activity(user_id, &fields).await?;
    info!("User {} logged activity {} on {}", user_id, activity_id, fields.date);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Activity created successfully",
        "id": activity_id,
    })))
}

// PUT /activities/:id
pub async fn update_activity(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    activity_id: web::Path<String>,
    payload: web::Json<ActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let activity_id = parse_id(&activity_id, "Activity")?;
    let fields = payload.into_inner().into_fields()?;

    if !store.update_activity(user_id, activity_id, &fields).await? {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Activity updated successfully" })))
}

// DELETE /activities/:id
pub async fn delete_activity(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    activity_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let activity_id = parse_id(&activity_id, "Activity")?;

    if !store.delete_activity(user_id, activity_id).await? {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Activity deleted successfully" })))
}
