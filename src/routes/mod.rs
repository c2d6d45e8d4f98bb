use actix_web::web;

use crate::handlers::{dump_handler, method_not_allowed, redirect_handler, shorten_handler};

// Configure all routes function
//
// `/shorten` and `/check` are the fixed endpoints; every other path is
// treated as a short code. The code is tail-matched so lookups see the
// full remainder of the path, exactly as the client sent it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/shorten")
            .route(web::post().to(shorten_handler))
            .default_service(web::route().to(method_not_allowed)),
    );
    cfg.service(
        web::resource("/check")
            .route(web::get().to(dump_handler))
            .default_service(web::route().to(method_not_allowed)),
    );
    cfg.service(
        web::resource("/{code:.*}")
            .route(web::get().to(redirect_handler))
            .default_service(web::route().to(method_not_allowed)),
    );
}
