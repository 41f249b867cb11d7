//! # forgeup
//!
//! Setup orchestrator for the Forge developer toolkit.
//!
//! `forgeup install` walks an ordered list of idempotent installation
//! steps against a project directory. Each step checks whether its end
//! state already holds, and only then shells out to the relevant
//! external tool (the GitHub CLI, the `forge` license binary) with a
//! bounded timeout. Failures degrade to warnings; nothing here aborts
//! an installation.
//!
//! ## Modules
//!
//! - `install` - installation context, the step trait, the orchestrator
//!   and the concrete steps
//! - `interaction` - user-facing message sinks (terminal, no-op, mock)
//! - `subprocess` - unified subprocess abstraction layer for testing
//! - `hooks` - standalone hooks invoked by the editor integration

pub mod hooks;
pub mod install;
pub mod interaction;
pub mod subprocess;
