use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use room_booking_api::{configure, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let store = db::Store::from_env();

    log::info!("Starting server at http://localhost:8080");

    let store_data = web::Data::new(store);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
