use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info};
use crate::models::daily_log::DaySummary;
use crate::errors::AppError;
use crate::store::Store;
use crate::utils::jwt::authenticated_user;
use crate::utils::validation::parse_date;
use crate::wellness::score_day;

// GET /daily/:date
pub async fn get_day(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let date = parse_date(&date)?;

    let log = store.fetch_day(user_id, date).await?;
    let score = score_day(&log);
    info!("User {} scored {} on {}", user_id, score.breakdown.score, date);

    Ok(HttpResponse::Ok().json(DaySummary { date, log, score }))
}

// GET /daily/:date/score
pub async fn get_day_score(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req)?;
    let date = parse_date(&date)?;

    let log = store.fetch_day(user_id, date).await?;
    if log.is_empty() {
        debug!("User {} logged nothing on {}", user_id, date);
    }

    Ok(HttpResponse::Ok().json(score_day(&log)))
}
