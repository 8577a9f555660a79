//! Web server for TutorHub.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::auth::SessionStore;
use crate::config::WebConfig;
use crate::{Database, Result, TutorHubError};

use super::handlers::AppState;
use super::router::create_app;

/// Web server for the site API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: AppState,
    /// Web configuration.
    web_config: WebConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &WebConfig, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| TutorHubError::Config(format!("Invalid web server address: {e}")))?;

        let sessions = SessionStore::new(config.session_expiry_secs);
        let app_state = AppState::new(db, sessions);

        Ok(Self {
            addr,
            app_state,
            web_config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session sweep background task.
    ///
    /// Runs every hour and removes expired sessions from the store.
    fn start_session_sweep_task(sessions: SessionStore) {
        tokio::spawn(async move {
            const SWEEP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let removed = sessions.cleanup().await;
                if removed > 0 {
                    tracing::info!(removed_count = removed, "Swept expired sessions");
                } else {
                    tracing::debug!("No expired sessions to sweep");
                }
            }
        });
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let sessions = self.app_state.sessions.clone();

        let router = create_app(self.app_state, &self.web_config.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the session sweep after a successful bind
        Self::start_session_sweep_task(sessions);
        tracing::info!("Session sweep task started (runs every hour)");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_parses_address() {
        let db = Database::open_in_memory().await.unwrap();
        let config = WebConfig::default();
        let server = WebServer::new(&config, db).unwrap();
        assert_eq!(server.addr().port(), config.port);
    }

    #[tokio::test]
    async fn test_server_rejects_bad_address() {
        let db = Database::open_in_memory().await.unwrap();
        let config = WebConfig {
            host: "not a host".to_string(),
            ..WebConfig::default()
        };
        assert!(WebServer::new(&config, db).is_err());
    }
}
