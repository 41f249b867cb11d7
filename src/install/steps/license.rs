//! License activation through the `forge` binary.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

use super::{ACTION_TIMEOUT, STATUS_TIMEOUT};
use crate::install::context::InstallContext;
use crate::install::step::InstallStep;
use crate::subprocess::{ProcessCommandBuilder, ProcessError};

pub const LICENSE_KEY_VAR: &str = "FORGE_LICENSE_KEY";

const MANUAL_HINT: &str = "Activate manually later with: forge activate <key>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
    Trial,
    Standard,
    Enterprise,
}

/// Status document emitted by `forge status --json`. An unrecognized
/// tier fails deserialization, which callers treat as "not valid".
#[derive(Debug, Deserialize)]
pub struct LicenseStatus {
    pub tier: LicenseTier,
    #[serde(default)]
    pub is_expired: bool,
}

impl LicenseStatus {
    pub fn is_valid(&self) -> bool {
        !self.is_expired
    }
}

/// Path to the `forge` binary, preferring a local checkout when the
/// context runs in local mode.
pub fn forge_binary_path(ctx: &InstallContext) -> PathBuf {
    if ctx.local_mode {
        if let Some(repo) = &ctx.local_repo_dir {
            let local = repo.join(".forge").join("bin").join("forge");
            if local.exists() {
                return local;
            }
        }
    }
    ctx.project_dir.join(".forge").join("bin").join("forge")
}

/// Whether a valid license is already in place, according to
/// `forge status --json`. Every infrastructure failure (missing
/// binary, non-zero exit, empty or unparseable output) reads as
/// "not valid".
pub async fn is_license_valid(ctx: &InstallContext) -> bool {
    let binary = forge_binary_path(ctx);
    if !binary.exists() {
        return false;
    }

    let command = ProcessCommandBuilder::new(&binary.to_string_lossy())
        .args(["status", "--json"])
        .timeout(STATUS_TIMEOUT)
        .build();

    let output = match ctx.subprocess.runner().run(command).await {
        Ok(output) => output,
        Err(err) => {
            debug!("forge status unavailable: {err}");
            return false;
        }
    };

    if !output.status.success() {
        return false;
    }

    let raw = if output.stdout.trim().is_empty() {
        output.stderr.trim()
    } else {
        output.stdout.trim()
    };
    if raw.is_empty() {
        return false;
    }

    match serde_json::from_str::<LicenseStatus>(raw) {
        Ok(status) => status.is_valid(),
        Err(err) => {
            debug!("unparseable forge status output: {err}");
            false
        }
    }
}

pub struct LicenseActivationStep;

#[async_trait]
impl InstallStep for LicenseActivationStep {
    fn name(&self) -> &'static str {
        "license-activation"
    }

    /// Skip when there is no key to activate with, or when a valid
    /// license is already in place.
    async fn check(&self, ctx: &InstallContext) -> bool {
        if ctx.credentials.resolve(LICENSE_KEY_VAR).is_none() {
            return true;
        }
        is_license_valid(ctx).await
    }

    async fn run(&self, ctx: &InstallContext) -> Result<()> {
        let ui = &ctx.ui;

        let Some(key) = ctx.credentials.resolve(LICENSE_KEY_VAR) else {
            ui.info("Set FORGE_LICENSE_KEY in .env to activate your license automatically");
            return Ok(());
        };

        let binary = forge_binary_path(ctx);
        if !binary.exists() {
            ui.warning("forge binary not found, skipping license activation");
            ui.info("The license will be activated on first run");
            return Ok(());
        }

        let command = ProcessCommandBuilder::new(&binary.to_string_lossy())
            .args(["activate", &key, "--json"])
            .timeout(ACTION_TIMEOUT)
            .build();

        match ctx.subprocess.runner().run(command).await {
            Ok(output) if output.status.success() => {
                ui.success("License activated");
            }
            Ok(output) => {
                ui.warning("License activation failed, continuing installation");
                let stderr = output.stderr.trim();
                if !stderr.is_empty() {
                    ui.detail(stderr);
                }
                ui.info(MANUAL_HINT);
            }
            Err(ProcessError::Timeout(_)) => {
                ui.warning("License activation timed out, continuing installation");
                ui.info(MANUAL_HINT);
            }
            Err(err) => {
                ui.warning(&format!("License activation error: {err}"));
                ui.info(MANUAL_HINT);
            }
        }

        Ok(())
    }
}
