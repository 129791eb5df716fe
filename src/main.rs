use actix_web::{App, HttpServer, middleware, web};

use roomtable::config::Config;
use roomtable::db;
use roomtable::handlers;
use roomtable::models::room;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    log::error!("{context}: {err}");
    std::io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Bad configuration", e))?;

    if let Some(dir) = db::database_dir(&config.database_url) {
        std::fs::create_dir_all(&dir)?;
    }

    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(|e| startup_error("Failed to open database", e))?;

    log::info!("Running migrations");
    db::run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let missing = db::missing_columns(&pool, &room::ROOMS)
        .await
        .map_err(|e| startup_error("Failed to read table schema", e))?;
    if !missing.is_empty() {
        return Err(startup_error(
            "Column mapping does not match schema",
            format!("table '{}' has no column(s) {}", room::ROOMS.name, missing.join(", ")),
        ));
    }

    if config.seed_on_start {
        log::info!("Seeding database");
        db::seed(&pool)
            .await
            .map_err(|e| startup_error("Failed to seed database", e))?;
    }

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(handlers::page_handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
