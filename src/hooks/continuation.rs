//! Plan-continuation reminder hook.
//!
//! Reads a tool-use event as JSON from stdin. When the event comes
//! from the `Skill` tool and a plan under `docs/plans` still needs
//! work, prints a banner to stderr telling the caller which action to
//! invoke next. Always exits successfully; this hook must never block
//! the caller.

use anyhow::Result;
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const TRIGGER_TOOL: &str = "Skill";
const PLANS_DIR: &str = "docs/plans";

#[derive(Debug, Deserialize)]
struct HookEvent {
    #[serde(default)]
    tool_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// Implementation finished, verification outstanding.
    Complete,
    /// Approved but not yet implemented.
    Pending,
}

/// Finds the most recent plan file (by filename, descending) that
/// still needs continuation. Verified plans are ignored; pending plans
/// count only once approved.
pub fn find_active_plan(plans_dir: &Path) -> Option<(PathBuf, PlanStatus)> {
    let entries = std::fs::read_dir(plans_dir).ok()?;
    let mut plans: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    plans.sort();

    for plan in plans.into_iter().rev() {
        let Ok(content) = std::fs::read_to_string(&plan) else {
            continue;
        };

        if content.contains("Status: VERIFIED") {
            continue;
        }
        if content.contains("Status: COMPLETE") {
            return Some((plan, PlanStatus::Complete));
        }
        if content.contains("Status: PENDING") && content.contains("Approved: Yes") {
            return Some((plan, PlanStatus::Pending));
        }
    }

    None
}

/// Entry point for `forgeup hook continuation`.
pub fn run() -> Result<()> {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        return Ok(());
    }
    let mut stderr = std::io::stderr();
    run_with_input(&input, Path::new(PLANS_DIR), &mut stderr);
    Ok(())
}

/// Testable core: parse the event, scan `plans_dir`, write the banner
/// to `out`. Silent on any non-trigger or malformed input.
pub fn run_with_input(input: &str, plans_dir: &Path, out: &mut dyn Write) {
    let Ok(event) = serde_json::from_str::<HookEvent>(input) else {
        debug!("unparseable hook event, ignoring");
        return;
    };

    if event.tool_name != TRIGGER_TOOL {
        return;
    }

    let Some((plan, status)) = find_active_plan(plans_dir) else {
        return;
    };

    print_banner(out, &plan, status);
}

// Write failures are deliberately swallowed: the hook's contract is
// exit code 0 no matter what.
fn print_banner(out: &mut dyn Write, plan: &Path, status: PlanStatus) {
    let border = "=".repeat(65);

    let _ = writeln!(out);
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "🚨 WORKFLOW CONTINUATION REQUIRED - DO NOT END RESPONSE 🚨");
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "Plan: {}", plan.display());

    match status {
        PlanStatus::Complete => {
            let _ = writeln!(out, "Status: COMPLETE → MUST invoke /verify NOW");
            let _ = writeln!(out);
            let _ = writeln!(out, "IN THIS SAME RESPONSE, invoke:");
            let _ = writeln!(out, "   Skill(skill=\"verify\", args=\"{}\")", plan.display());
        }
        PlanStatus::Pending => {
            let _ = writeln!(out, "Status: PENDING (approved) → MUST invoke /implement NOW");
            let _ = writeln!(out);
            let _ = writeln!(out, "IN THIS SAME RESPONSE, invoke:");
            let _ = writeln!(
                out,
                "   Skill(skill=\"implement\", args=\"{}\")",
                plan.display()
            );
        }
    }

    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "⛔ STOPPING WITHOUT CONTINUING IS A WORKFLOW VIOLATION");
    let _ = writeln!(out, "{border}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn plans_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn latest_plan_wins() {
        let dir = plans_dir(&[
            ("001-old.md", "Status: COMPLETE\n"),
            ("002-new.md", "Status: COMPLETE\n"),
        ]);

        let (plan, status) = find_active_plan(dir.path()).unwrap();
        assert_eq!(plan.file_name().unwrap(), "002-new.md");
        assert_eq!(status, PlanStatus::Complete);
    }

    #[test]
    fn verified_plans_are_skipped() {
        let dir = plans_dir(&[
            ("001-open.md", "Status: COMPLETE\n"),
            ("002-done.md", "Status: VERIFIED\n"),
        ]);

        let (plan, _) = find_active_plan(dir.path()).unwrap();
        assert_eq!(plan.file_name().unwrap(), "001-open.md");
    }

    #[test]
    fn pending_requires_approval() {
        let dir = plans_dir(&[("001.md", "Status: PENDING\n")]);
        assert!(find_active_plan(dir.path()).is_none());

        let dir = plans_dir(&[("001.md", "Status: PENDING\nApproved: Yes\n")]);
        let (_, status) = find_active_plan(dir.path()).unwrap();
        assert_eq!(status, PlanStatus::Pending);
    }

    #[test]
    fn missing_plans_dir_is_none() {
        assert!(find_active_plan(Path::new("/nonexistent/plans")).is_none());
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let dir = plans_dir(&[("notes.txt", "Status: COMPLETE\n")]);
        assert!(find_active_plan(dir.path()).is_none());
    }

    #[test]
    fn non_trigger_tool_is_silent() {
        let dir = plans_dir(&[("001.md", "Status: COMPLETE\n")]);
        let mut out = Vec::new();

        run_with_input(r#"{"tool_name": "Bash"}"#, dir.path(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn malformed_input_is_silent() {
        let dir = plans_dir(&[("001.md", "Status: COMPLETE\n")]);
        let mut out = Vec::new();

        run_with_input("not json", dir.path(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn complete_plan_banner_points_at_verify() {
        let dir = plans_dir(&[("001.md", "Status: COMPLETE\n")]);
        let mut out = Vec::new();

        run_with_input(r#"{"tool_name": "Skill"}"#, dir.path(), &mut out);

        let banner = String::from_utf8(out).unwrap();
        assert!(banner.contains("001.md"));
        assert!(banner.contains("skill=\"verify\""));
    }

    #[test]
    fn approved_pending_banner_points_at_implement() {
        let dir = plans_dir(&[("001.md", "Status: PENDING\nApproved: Yes\n")]);
        let mut out = Vec::new();

        run_with_input(r#"{"tool_name": "Skill"}"#, dir.path(), &mut out);

        let banner = String::from_utf8(out).unwrap();
        assert!(banner.contains("skill=\"implement\""));
    }
}
