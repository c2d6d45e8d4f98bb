use actix_web::{http::header::LOCATION, web, HttpResponse, Responder};
use log::{debug, info};

use crate::errors::AppError;
use crate::models::ShortenRequest;
use crate::services::ShortenerService;

type Result<T> = std::result::Result<T, AppError>;

/// Shorten route handler
pub async fn shorten_handler(
    request: web::Json<ShortenRequest>,
    service: web::Data<ShortenerService>,
) -> Result<impl Responder> {
    let response = service.shorten(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Dump route handler: every stored association as JSON
pub async fn dump_handler(service: web::Data<ShortenerService>) -> Result<impl Responder> {
    let associations = service.dump().await?;
    Ok(HttpResponse::Ok().json(associations))
}

/// Redirect route handler
pub async fn redirect_handler(
    path: web::Path<String>,
    service: web::Data<ShortenerService>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    debug!("Redirect requested for code: {}", code);

    // The tail pattern also matches the bare root path
    if code.is_empty() {
        return Err(AppError::Validation("Short URL is required".to_string()));
    }

    let original_url = service.resolve(&code).await?;
    info!("Redirecting '{}' to '{}'", code, original_url);

    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((LOCATION, original_url))
        .finish())
}

/// JSON 405 for a known path hit with the wrong method
pub async fn method_not_allowed() -> Result<HttpResponse> {
    Err(AppError::MethodNotAllowed("Method not allowed".to_string()))
}
