use actix_web::{middleware, web, App, HttpServer};

use facfeed::config::Config;
use facfeed::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // Ensure the data directory exists for the default sqlite path
    std::fs::create_dir_all("data")?;

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to create DB pool");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    db::seed_questions(&pool).await.expect("Failed to seed question catalog");

    if config.fallback_admin_emails.is_empty() {
        log::warn!("No FALLBACK_ADMIN_EMAILS set — admin access requires an admins row");
    }

    log::info!("Starting server at http://{}", config.bind_addr);
    let bind_addr = config.bind_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(serde_json::json!({
                    "error": "Not found"
                }))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
