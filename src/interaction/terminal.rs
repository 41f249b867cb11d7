//! Terminal implementation of the interaction sink.

use super::UserInteraction;

pub struct TerminalInteraction;

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl UserInteraction for TerminalInteraction {
    fn section(&self, title: &str) {
        println!();
        println!("== {title} ==");
    }

    fn info(&self, message: &str) {
        println!("ℹ️  {message}");
    }

    fn warning(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn success(&self, message: &str) {
        println!("✅ {message}");
    }

    fn detail(&self, message: &str) {
        println!("   {message}");
    }
}
