use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;
use crate::handlers;
use crate::utils::jwt::validator;
use crate::utils::validation::json_error_handler;

/// Registers every route. Expects `web::Data<Config>` and `web::Data<dyn Store>`
/// to be attached to the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Authentication middleware
    let auth = HttpAuthentication::with_fn(validator);

    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::resource("/register")
                .route(web::post().to(handlers::auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::post().to(handlers::auth::login)),
        )
        // Activities
        .service(
            web::resource("/activities")
                .wrap(auth.clone())
                .route(web::get().to(handlers::activity::get_activities))
                .route(web::post().to(handlers::activity::create_activity)),
        )
        .service(
            web::resource("/activities/date/{date}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::activity::get_activities_by_date)),
        )
        .service(
            web::resource("/activities/{id}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::activity::get_activity))
                .route(web::put().to(handlers::activity::update_activity))
                .route(web::delete().to(handlers::activity::delete_activity)),
        )
        // Meals
        .service(
            web::resource("/meals")
                .wrap(auth.clone())
                .route(web::get().to(handlers::meal::get_meals))
                .route(web::post().to(handlers::meal::create_meal)),
        )
        .service(
            web::resource("/meals/date/{date}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::meal::get_meals_by_date)),
        )
        .service(
            web::resource("/meals/{id}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::meal::get_meal))
                .route(web::put().to(handlers::meal::update_meal))
                .route(web::delete().to(handlers::meal::delete_meal)),
        )
        // Exercises
        .service(
            web::resource("/exercises")
                .wrap(auth.clone())
                .route(web::get().to(handlers::exercise::get_exercises))
                .route(web::post().to(handlers::exercise::create_exercise)),
        )
        .service(
            web::resource("/exercises/date/{date}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::exercise::get_exercises_by_date)),
        )
        .service(
            web::resource("/exercises/{id}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::exercise::get_exercise))
                .route(web::put().to(handlers::exercise::update_exercise))
                .route(web::delete().to(handlers::exercise::delete_exercise)),
        )
        // Daily log and wellness score
        .service(
            web::resource("/daily/{date}")
                .wrap(auth.clone())
                .route(web::get().to(handlers::daily::get_day)),
        )
        .service(
            web::resource("/daily/{date}/score")
                .wrap(auth)
                .route(web::get().to(handlers::daily::get_day_score)),
        );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use crate::test_utils::{memory_store, test_app, test_config};

    #[actix_web::test]
    async fn health_is_public() {
        let app = test_app!(test_config(), memory_store());
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_json_uses_error_shape() {
        let app = test_app!(test_config(), memory_store());
        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
