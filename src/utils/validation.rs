use actix_web::{error::JsonPayloadError, HttpRequest};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationErrors};
use crate::errors::AppError;

lazy_static! {
    pub static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|err| AppError::BadRequest(describe(&err)))
}

// "field: message; field: message", sorted so the output is stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Parses a `YYYY-MM-DD` path segment.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date format".to_string()))
}

/// Parses a numeric record id path segment; `kind` names the record in the error.
pub fn parse_id(raw: &str, kind: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("{} ID must be a number", kind)))
}

/// Keeps malformed JSON bodies in the same `{"error": ...}` shape as every other failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
        duration_min: i32,
        #[validate(regex(path = "USERNAME_RE", message = "Username contains invalid characters"))]
        username: String,
    }

    #[test]
    fn validation_messages_are_joined() {
        let probe = Probe { duration_min: 0, username: "no spaces".to_string() };
        let err = validate_payload(&probe).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert_eq!(
                msg,
                "Duration must be at least 1 minute; Username contains invalid characters"
            ),
            other => panic!("unexpected error {:?}", other),
        }

        let ok = Probe { duration_min: 5, username: "jo_doe".to_string() };
        assert!(validate_payload(&ok).is_ok());
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(parse_date("2024-03-09").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert!(parse_date("09/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(parse_id("17", "Meal").unwrap(), 17);
        match parse_id("abc", "Meal") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Meal ID must be a number"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
