use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use bcrypt::{hash, verify};
use validator::Validate;
use log::info;
use crate::config::Config;
use crate::models::user::PublicUser;
use crate::errors::AppError;
use crate::store::Store;
use crate::utils::jwt::generate_token;
use crate::utils::validation::{validate_payload, USERNAME_RE};
use actix_web::rt::task::spawn_blocking;
use lazy_static::lazy_static;
use moka::sync::Cache;

lazy_static! {
    // Usernames are never released, so a hit here is always a real conflict.
    static ref USERNAME_CACHE: Cache<String, ()> = Cache::new(10_000);
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required(message = "Username is required"))]
    #[validate(length(min = 3, max = 64, message = "Username must be between 3 and 64 characters"))]
    #[validate(regex(path = "USERNAME_RE", message = "Username may only contain letters, digits, '.', '_' and '-'"))]
    username: Option<String>,

    #[validate(required(message = "Password is required"))]
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    password: Option<String>,

    #[validate(required(message = "Name is required"))]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: PublicUser,
}

// POST /register
pub async fn register(
    req: web::Json<RegisterRequest>,
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&req.0)?;

    let RegisterRequest { username, password, name } = req.into_inner();
    let (username, password, name) = match (username, password, name) {
        (Some(u), Some(p), Some(n)) => (u, p, n),
        _ => return Err(AppError::BadRequest("All fields are required".to_string())),
    };

    if USERNAME_CACHE.get(&username).is_some() {
        return Err(AppError::BadRequest("Username already exists".to_string()));
    }

    let cost = config.bcrypt_cost;
    let password_hash = spawn_blocking(move || hash(&password, cost))
        .await
        .map_err(|_| AppError::InternalServerError("Hashing failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let user_id = store.create_user(&username, &password_hash, &name).await?;
    USERNAME_CACHE.insert(username.clone(), ());
    info!("Registered user {} ({})", user_id, username);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "User registered successfully",
        "id": user_id,
    })))
}

// POST /login
pub async fn login(
    req: web::Json<LoginRequest>,
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = req.into_inner();
    let (username, password) = match (
        username.filter(|u| !u.is_empty()),
        password.filter(|p| !p.is_empty()),
    ) {
        (Some(u), Some(p)) => (u, p),
        _ => return Err(AppError::BadRequest("Username and password are required".to_string())),
    };

    let user = store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Verify password using bcrypt
    let stored_hash = user.password.clone();
    let is_valid = spawn_blocking(move || verify(password.as_str(), &stored_hash))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !is_valid {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let user_id = user.user_id;
    let secret = config.jwt_secret.clone();
    let ttl = config.token_ttl_minutes;
    let token = spawn_blocking(move || generate_token(user_id, &secret, ttl))
        .await
        .map_err(|_| AppError::InternalServerError("Token generation error".to_string()))?
        .map_err(|_| AppError::InternalServerError("Token generation error".to_string()))?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: user.into(),
    }))
}
