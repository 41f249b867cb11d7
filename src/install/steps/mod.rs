//! Concrete installation steps.

pub mod github_auth;
pub mod license;

pub use github_auth::GitHubAuthStep;
pub use license::LicenseActivationStep;

use std::time::Duration;

/// Timeout for informational status probes.
pub(crate) const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for invocations that change state.
pub(crate) const ACTION_TIMEOUT: Duration = Duration::from_secs(30);
