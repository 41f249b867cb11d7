use std::path::PathBuf;
use std::sync::Arc;

use crate::install::credentials::CredentialResolver;
use crate::interaction::UserInteraction;
use crate::subprocess::SubprocessManager;

/// Read-only bundle of paths and collaborators handed to every step.
///
/// Built once per installation run. Steps never mutate it.
#[derive(Clone)]
pub struct InstallContext {
    pub project_dir: PathBuf,
    /// Prefer binaries from a local Forge checkout over the ones
    /// installed under the project.
    pub local_mode: bool,
    pub local_repo_dir: Option<PathBuf>,
    pub ui: Arc<dyn UserInteraction>,
    pub subprocess: SubprocessManager,
    pub credentials: Arc<CredentialResolver>,
}

impl InstallContext {
    pub fn new(
        project_dir: PathBuf,
        ui: Arc<dyn UserInteraction>,
        subprocess: SubprocessManager,
    ) -> Self {
        let credentials = Arc::new(CredentialResolver::standard(project_dir.join(".env")));
        Self {
            project_dir,
            local_mode: false,
            local_repo_dir: None,
            ui,
            subprocess,
            credentials,
        }
    }

    pub fn with_local_repo(mut self, dir: Option<PathBuf>) -> Self {
        self.local_mode = true;
        self.local_repo_dir = dir;
        self
    }

    /// Replace the credential sources, e.g. with fixed values in tests.
    pub fn with_credentials(mut self, credentials: CredentialResolver) -> Self {
        self.credentials = Arc::new(credentials);
        self
    }

    pub fn env_file(&self) -> PathBuf {
        self.project_dir.join(".env")
    }
}
