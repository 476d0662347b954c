use crate::{
    api::{attendance, employee, health},
    config::Config,
    error::ApiError,
};
use actix_cors::Cors;
use actix_web::{HttpRequest, error::JsonPayloadError, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    // Public routes
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    )
                    // /attendance/{employee_id}/present-days
                    .service(
                        web::resource("/{employee_id}/present-days")
                            .route(web::get().to(attendance::present_days)),
                    ),
            ),
    );
}

/// Unparseable or incomplete JSON bodies are validation failures (422), not 400s.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => e.to_string(),
        other => other.to_string(),
    };

    ApiError::Validation {
        field: None,
        message,
    }
    .into()
}

pub fn cors(config: &Config) -> Cors {
    match &config.cors_allowed_origin {
        None => Cors::permissive(),
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
    }
}
