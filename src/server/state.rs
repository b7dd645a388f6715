//! Server state and configuration.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::{DEFAULT_BACKEND_URL, HttpGenerator, SlideGenerator};
use crate::deck::DeckStore;
use crate::error::Result;
use crate::playback::Presentation;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
    /// Generation endpoint (e.g., "http://127.0.0.1:5000/generate_ppt_data")
    pub backend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

/// Application state shared across handlers.
///
/// One editing session per server: a single store and at most one running
/// presentation.
pub struct AppState {
    pub config: ServerConfig,
    pub store: RwLock<DeckStore>,
    pub presentation: RwLock<Option<Presentation>>,
    pub generator: Arc<dyn SlideGenerator>,
}

impl AppState {
    /// State backed by the HTTP generation client.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let generator = HttpGenerator::new(config.backend_url.clone())?;
        Ok(Self::with_generator(config, Arc::new(generator)))
    }

    pub fn with_generator(config: ServerConfig, generator: Arc<dyn SlideGenerator>) -> Self {
        Self {
            config,
            store: RwLock::new(DeckStore::new()),
            presentation: RwLock::new(None),
            generator,
        }
    }
}
