use anyhow::Result;
use async_trait::async_trait;

use super::context::InstallContext;

/// A named, idempotent unit of installation work.
#[async_trait]
pub trait InstallStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns true when the desired end state already holds and `run`
    /// should be skipped.
    async fn check(&self, ctx: &InstallContext) -> bool;

    async fn run(&self, ctx: &InstallContext) -> Result<()>;

    /// Undo the step after a later step fails. Most steps have nothing
    /// safe to undo.
    async fn rollback(&self, _ctx: &InstallContext) -> Result<()> {
        Ok(())
    }
}
