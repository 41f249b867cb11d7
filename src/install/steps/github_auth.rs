//! GitHub CLI authentication using a `GH_TOKEN` credential.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{ACTION_TIMEOUT, STATUS_TIMEOUT};
use crate::install::context::InstallContext;
use crate::install::step::InstallStep;
use crate::subprocess::{ProcessCommandBuilder, ProcessError};

pub const GH_TOKEN_VAR: &str = "GH_TOKEN";

pub struct GitHubAuthStep;

impl GitHubAuthStep {
    async fn is_authenticated(ctx: &InstallContext) -> bool {
        let command = ProcessCommandBuilder::new("gh")
            .args(["auth", "status"])
            .timeout(STATUS_TIMEOUT)
            .build();

        match ctx.subprocess.runner().run(command).await {
            Ok(output) => output.status.success(),
            Err(err) => {
                debug!("gh auth status unavailable: {err}");
                false
            }
        }
    }
}

#[async_trait]
impl InstallStep for GitHubAuthStep {
    fn name(&self) -> &'static str {
        "github-auth"
    }

    async fn check(&self, ctx: &InstallContext) -> bool {
        Self::is_authenticated(ctx).await
    }

    async fn run(&self, ctx: &InstallContext) -> Result<()> {
        let ui = &ctx.ui;
        ui.section("GitHub CLI authentication");

        let Some(token) = ctx.credentials.resolve(GH_TOKEN_VAR) else {
            ui.info("Set GH_TOKEN in .env for automatic GitHub CLI authentication");
            return Ok(());
        };

        let command = ProcessCommandBuilder::new("gh")
            .args(["auth", "login", "--with-token"])
            .stdin(token)
            .timeout(ACTION_TIMEOUT)
            .build();

        match ctx.subprocess.runner().run(command).await {
            Ok(output) if output.status.success() => {
                ui.success("GitHub CLI authenticated");
            }
            Ok(output) => {
                let stderr = output.stderr.trim();
                let reason = if stderr.is_empty() {
                    "unknown error"
                } else {
                    stderr
                };
                ui.error(&format!("GitHub CLI authentication failed: {reason}"));
            }
            Err(ProcessError::CommandNotFound(_)) => {
                ui.error("GitHub CLI (gh) not found. Install it first.");
            }
            Err(ProcessError::Timeout(_)) => {
                ui.error("GitHub CLI authentication timed out");
            }
            Err(err) => {
                ui.error(&format!("GitHub CLI authentication error: {err}"));
            }
        }

        Ok(())
    }

    // Revoking auth on rollback would be more disruptive than leaving
    // it in place.
}
