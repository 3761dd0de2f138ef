use std::sync::{Arc, Mutex};

use super::ProjectRegistrar;
use crate::error::ProjsyncError;

/// Test registrar: records calls, never spawns anything.
///
/// Clones share the same call log, so a clone can be handed to a
/// [`HookAdapter`](crate::hook::HookAdapter) while the test keeps the original.
#[derive(Debug, Clone, Default)]
pub struct MockRegistrar {
    calls: Arc<Mutex<Vec<String>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registrar whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::default();
        mock.set_failure(Some(message.into()));
        mock
    }

    pub fn set_failure(&self, message: Option<String>) {
        *self.fail_with.lock().unwrap() = message;
    }

    /// Project names passed to `register`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ProjectRegistrar for MockRegistrar {
    fn register(&self, project: &str) -> Result<(), ProjsyncError> {
        self.calls.lock().unwrap().push(project.to_string());

        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(ProjsyncError::Registrar {
                project: project.to_string(),
                message,
            });
        }
        Ok(())
    }
}
