use tracing::info;

use tutorhub::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = tutorhub::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        tutorhub::logging::init_console_only(&config.logging.level);
    }

    info!("TutorHub - tutoring marketplace backend");

    let db = match Database::open(&config.database.path, config.database.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database at {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config.web, db) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to configure web server: {e}");
            std::process::exit(1);
        }
    };

    info!("Server configured on {}:{}", config.web.host, config.web.port);

    if let Err(e) = server.run().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
