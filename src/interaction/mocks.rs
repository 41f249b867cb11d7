//! Recording interaction sink for tests.

use std::sync::Mutex;

use super::UserInteraction;

/// Records every message with a tag prefix so tests can assert on the
/// exact sequence a step emitted.
#[derive(Default)]
pub struct MockUserInteraction {
    messages: Mutex<Vec<String>>,
}

impl MockUserInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Messages with the given tag, e.g. `"INFO"`.
    pub fn tagged(&self, tag: &str) -> Vec<String> {
        let prefix = format!("{tag}: ");
        self.messages()
            .into_iter()
            .filter_map(|m| m.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    fn record(&self, tag: &str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{tag}: {message}"));
    }
}

impl UserInteraction for MockUserInteraction {
    fn section(&self, title: &str) {
        self.record("SECTION", title);
    }

    fn info(&self, message: &str) {
        self.record("INFO", message);
    }

    fn warning(&self, message: &str) {
        self.record("WARN", message);
    }

    fn error(&self, message: &str) {
        self.record("ERROR", message);
    }

    fn success(&self, message: &str) {
        self.record("SUCCESS", message);
    }

    fn detail(&self, message: &str) {
        self.record("DETAIL", message);
    }
}
