use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use traffic_insights::config::Config;
use traffic_insights::server::{self, UploadSettings};
use traffic_insights::store::PredictionStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(&config);

    std::fs::create_dir_all(&config.upload_dir).map_err(|e| {
        error!("Cannot create upload directory {}: {}", config.upload_dir.display(), e);
        e
    })?;

    let store = web::Data::new(PredictionStore::new());
    let settings = web::Data::new(UploadSettings {
        dir: config.upload_dir.clone(),
        max_bytes: config.max_upload_bytes,
    });

    let (host, port) = config.bind_addr();
    info!("Listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .app_data(settings.clone())
            .configure(server::configure)
    })
    .bind((host, port))?
    .run()
    .await
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
