//! Core application

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::cli::{self, Cli};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::memory::{HostGroupCatalog, TimeperiodCatalog};

pub struct CoreApp {
    pub config: AppConfig,
    pub host_groups: Arc<HostGroupCatalog>,
    pub timeperiods: Arc<TimeperiodCatalog>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli = cli::parse();
        let app = Self::init(&cli)?;
        ApiServer::new(app).start().await
    }

    fn init(cli: &Cli) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let host_groups = Arc::new(HostGroupCatalog::with_sample_data());
        let timeperiods = Arc::new(TimeperiodCatalog::with_sample_data());
        Ok(Self {
            config,
            host_groups,
            timeperiods,
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
