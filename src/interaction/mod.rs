//! User-facing message sinks for install steps.
//!
//! Steps report through [`UserInteraction`] unconditionally; running
//! without a console means running with [`NoopInteraction`], not with
//! an `Option`.

pub mod mocks;
pub mod terminal;

pub use terminal::TerminalInteraction;

/// Trait for reporting installation progress to a human.
pub trait UserInteraction: Send + Sync {
    /// Begin a titled section of output.
    fn section(&self, title: &str);

    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    fn success(&self, message: &str);

    /// Secondary detail under a previous message, e.g. captured stderr.
    fn detail(&self, message: &str);
}

/// Sink that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInteraction;

impl UserInteraction for NoopInteraction {
    fn section(&self, _title: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn detail(&self, _message: &str) {}
}
