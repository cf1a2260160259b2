use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use receipt_points::config::{LoggingSettings, Settings};
use receipt_points::routes::{self, AppState};
use receipt_points::services::ScoreStore;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&settings.logging);

    let store = Arc::new(ScoreStore::new());
    let app_state = AppState::new(store);

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Server starting on port {}...", port);

    let mut server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    let server = match server.bind((host.as_str(), port)) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to listen on {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };

    server.run().await
}
