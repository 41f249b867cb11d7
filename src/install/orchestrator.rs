use anyhow::Result;
use tracing::{debug, warn};

use super::context::InstallContext;
use super::step::InstallStep;
use super::steps::{GitHubAuthStep, LicenseActivationStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Skipped,
    Completed,
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub steps: Vec<StepReport>,
}

impl InstallReport {
    pub fn completed(&self) -> usize {
        self.count(StepOutcome::Completed)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepOutcome::Skipped)
    }

    fn count(&self, outcome: StepOutcome) -> usize {
        self.steps
            .iter()
            .filter(|step| step.outcome == outcome)
            .count()
    }
}

/// Runs steps strictly in order, tracking which ones completed so they
/// can be rolled back when a later step fails.
pub struct Orchestrator {
    steps: Vec<Box<dyn InstallStep>>,
}

impl Orchestrator {
    pub fn new(steps: Vec<Box<dyn InstallStep>>) -> Self {
        Self { steps }
    }

    /// The stock installation: GitHub CLI auth, then license
    /// activation.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(GitHubAuthStep),
            Box::new(LicenseActivationStep),
        ])
    }

    pub async fn execute(&self, ctx: &InstallContext) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        let mut completed: Vec<&dyn InstallStep> = Vec::new();

        for step in &self.steps {
            if step.check(ctx).await {
                debug!("step {} already satisfied, skipping", step.name());
                report.steps.push(StepReport {
                    name: step.name(),
                    outcome: StepOutcome::Skipped,
                });
                continue;
            }

            debug!("running step {}", step.name());
            if let Err(err) = step.run(ctx).await {
                ctx.ui
                    .error(&format!("Step {} failed: {err:#}", step.name()));
                self.rollback_completed(ctx, &completed).await;
                return Err(err);
            }

            completed.push(step.as_ref());
            report.steps.push(StepReport {
                name: step.name(),
                outcome: StepOutcome::Completed,
            });
        }

        Ok(report)
    }

    async fn rollback_completed(&self, ctx: &InstallContext, completed: &[&dyn InstallStep]) {
        for step in completed.iter().rev() {
            debug!("rolling back step {}", step.name());
            if let Err(err) = step.rollback(ctx).await {
                warn!("rollback of {} failed: {err:#}", step.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::mocks::MockUserInteraction;
    use crate::subprocess::SubprocessManager;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct ScriptedStep {
        name: &'static str,
        skip: bool,
        fail: bool,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl InstallStep for ScriptedStep {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn check(&self, _ctx: &InstallContext) -> bool {
            self.log.lock().unwrap().push(format!("check {}", self.name));
            self.skip
        }

        async fn run(&self, _ctx: &InstallContext) -> Result<()> {
            self.log.lock().unwrap().push(format!("run {}", self.name));
            if self.fail {
                return Err(anyhow!("scripted failure"));
            }
            Ok(())
        }

        async fn rollback(&self, _ctx: &InstallContext) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("rollback {}", self.name));
            Ok(())
        }
    }

    fn test_ctx() -> InstallContext {
        let (subprocess, _) = SubprocessManager::mock();
        InstallContext::new(
            PathBuf::from("/tmp/does-not-matter"),
            Arc::new(MockUserInteraction::new()),
            subprocess,
        )
    }

    #[tokio::test]
    async fn skipped_step_never_runs() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = Orchestrator::new(vec![Box::new(ScriptedStep {
            name: "a",
            skip: true,
            fail: false,
            log: log.clone(),
        })]);

        let report = orchestrator.execute(&test_ctx()).await.unwrap();
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.completed(), 0);
        assert_eq!(*log.lock().unwrap(), vec!["check a"]);
    }

    #[tokio::test]
    async fn steps_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = Orchestrator::new(vec![
            Box::new(ScriptedStep {
                name: "a",
                skip: false,
                fail: false,
                log: log.clone(),
            }),
            Box::new(ScriptedStep {
                name: "b",
                skip: false,
                fail: false,
                log: log.clone(),
            }),
        ]);

        let report = orchestrator.execute(&test_ctx()).await.unwrap();
        assert_eq!(report.completed(), 2);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["check a", "run a", "check b", "run b"]
        );
    }

    #[tokio::test]
    async fn failure_rolls_back_completed_steps_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = Orchestrator::new(vec![
            Box::new(ScriptedStep {
                name: "a",
                skip: false,
                fail: false,
                log: log.clone(),
            }),
            Box::new(ScriptedStep {
                name: "b",
                skip: false,
                fail: false,
                log: log.clone(),
            }),
            Box::new(ScriptedStep {
                name: "c",
                skip: false,
                fail: true,
                log: log.clone(),
            }),
        ]);

        let result = orchestrator.execute(&test_ctx()).await;
        assert!(result.is_err());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "check a",
                "run a",
                "check b",
                "run b",
                "check c",
                "run c",
                "rollback b",
                "rollback a",
            ]
        );
    }
}
