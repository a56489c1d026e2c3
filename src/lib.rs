use actix_web::web;

pub mod db;
pub mod handlers;
pub mod models;

/// Mounts the API routes. Shared between the binary and the integration
/// tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/rooms")
            .route(web::get().to(handlers::rooms::get_rooms))
            .route(web::post().to(handlers::rooms::create_room))
            .route(web::route().to(handlers::rooms::method_not_allowed)),
    );
}
