//! Installation orchestration.
//!
//! An installation is an ordered list of idempotent steps run against
//! an [`InstallContext`]. Each step checks whether its end state
//! already holds before doing anything, and reports through the
//! context's interaction sink.

pub mod context;
pub mod credentials;
pub mod orchestrator;
pub mod step;
pub mod steps;

pub use context::InstallContext;
pub use credentials::{CredentialResolver, CredentialSource, DotfileSource, EnvSource};
pub use orchestrator::{InstallReport, Orchestrator, StepOutcome};
pub use step::InstallStep;
