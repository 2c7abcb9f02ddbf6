use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use validator::Validate;
use chrono::NaiveDate;
use log::{debug, info};
use crate::models::meal::{MealFields, MealType};
use crate::errors::AppError;
use crate::store::Store;
use crate::utils::jwt::authenticated_user;
use crate::utils::validation::{parse_date, parse_id, validate_payload};

#[derive(Deserialize, Validate)]
pub struct MealRequest {
    #[validate(required(message = "Meal type is required"))]
    #[serde(rename = "type")]
    meal_type: Option<MealType>,

    #[validate(required(message = "Description is required"))]
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    description: Option<String>,

    #[validate(required(message = "Calories is required"))]
    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    calories: Option<i32>,

    #[validate(required(message = "Date is required"))]
    date: Option<NaiveDate>,
}

impl MealRequest {
    fn into_fields(self) -> Result<MealFields, AppError> {
        validate_payload(&self)?;
        match (self.meal_type, self.description, self.calories, self.date) {
            (Some(meal_type), Some(description), Some(calories), Some(date)) => Ok(MealFields {
                meal_type,
                description,
                calories,
                date,
            }),
            _ => Err(AppError::BadRequest("All fields are required".to_string())),
        }
    }
}

// GET /meals
pub async fn get_meals(
    req: HttpRequest,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;

    let meals = store.list_meals(user_id).await?;
    if meals.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    Ok(HttpResponse::Ok().json(meals))
}

// GET /meals/date/:date
pub async fn get_meals_by_date(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let date = parse_date(&date)?;

    let meals = store.list_meals_on(user_id, date).await?;
    debug!("User {} has {} meals on {}", user_id, meals.len(), date);

    Ok(HttpResponse::Ok().json(meals))
}

// GET /meals/:id
pub async fn get_meal(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    meal_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let meal_id = parse_id(&meal_id, "Meal")?;

    let meal = store
        .get_meal(user_id, meal_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal not found".to_string()))?;

    Ok(HttpResponse::Ok().json(meal))
}

// POST /meals
pub async fn create_meal(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    payload: web::Json<MealRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let fields = payload.into_inner().into_fields()?;

    let meal_id = store.insert_meal(user_id, &fields).await?;
    info!("User {} logged meal {} on {}", user_id, meal_id, fields.date);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Meal created successfully",
        "id": meal_id,
    })))
}

// PUT /meals/:id
pub async fn update_meal(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    meal_id: web::Path<String>,
    payload: web::Json<MealRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let meal_id = parse_id(&meal_id, "Meal")?;
    let fields = payload.into_inner().into_fields()?;

    if !store.update_meal(user_id, meal_id, &fields).await? {
        return Err(AppError::NotFound("Meal not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Meal updated successfully" })))
}

// DELETE /meals/:id
pub async fn delete_meal(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    meal_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let meal_id = parse_id(&meal_id, "Meal")?;

    if !store.delete_meal(user_id, meal_id).await? {
        return Err(AppError::NotFound("Meal not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Meal deleted successfully" })))
}
