use actix_web::web;

mod shortener;

pub use shortener::ShortenerService;

use crate::repositories::SharedUrlRepository;

/// Service Register
pub fn register(repository: SharedUrlRepository, base_url: String, cfg: &mut web::ServiceConfig) {
    let shortener_service = ShortenerService::new(repository, base_url);
    cfg.app_data(web::Data::new(shortener_service));
}
