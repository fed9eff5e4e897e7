//! Application state - the ports every page reaches through.

use std::sync::Arc;

use agora_core::ports::{BoardFixtures, FixtureError, ProfileSource, ToastSink};
use agora_infra::{MockProfileSource, StaticFixtures};

use crate::config::ConsoleConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub fixtures: Arc<dyn BoardFixtures>,
    pub profiles: Arc<dyn ProfileSource>,
    pub toasts: Arc<dyn ToastSink>,
}

impl AppState {
    /// Build the state from configuration. The toast sink is created by the
    /// caller so it can keep a concrete handle for subscribing.
    pub fn new(config: &ConsoleConfig, toasts: Arc<dyn ToastSink>) -> Result<Self, FixtureError> {
        let fixtures: Arc<dyn BoardFixtures> = match &config.fixtures {
            Some(path) => Arc::new(StaticFixtures::from_path(path)?),
            None => {
                tracing::info!("Using the embedded fixture set");
                Arc::new(StaticFixtures::embedded()?)
            }
        };

        let profiles: Arc<dyn ProfileSource> = Arc::new(
            MockProfileSource::new(config.profile_delay).fail_next(config.profile_failures),
        );

        tracing::info!(
            user_id = config.user_id,
            profile_delay_ms = config.profile_delay.as_millis() as u64,
            "Application state initialized"
        );

        Ok(Self {
            fixtures,
            profiles,
            toasts,
        })
    }
}
