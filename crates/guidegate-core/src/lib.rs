use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod guides;

use auth::CredentialVerifier;
use config::AppConfig;
use guides::GuideService;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub guides: Arc<GuideService>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Build state from a loaded config, using the static bearer token check.
    pub fn new(config: AppConfig) -> Self {
        let verifier = auth::StaticTokenVerifier::new(config.auth_token.clone());
        Self::with_verifier(config, Arc::new(verifier))
    }

    pub fn with_verifier(config: AppConfig, verifier: Arc<dyn CredentialVerifier>) -> Self {
        let guides = GuideService::new(
            config.userguide_path.clone(),
            config.userguide_filename.clone(),
        );
        Self {
            config: Arc::new(config),
            guides: Arc::new(guides),
            verifier,
        }
    }
}
